//! Rectangle shape.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// A rectangle with optional rounded corners, anchored at its object position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
    /// Fill color (None = no fill).
    pub fill: Option<Color>,
    /// Stroke color (None = no outline).
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// Corner radius (0 = sharp corners).
    #[serde(default)]
    pub corner_radius: f64,
}

impl Rectangle {
    /// Create an unfilled, unstroked rectangle.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            corner_radius: 0.0,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Corner radius limited to half the smaller side.
    pub fn effective_corner_radius(&self) -> f64 {
        self.corner_radius
            .min(self.width / 2.0)
            .min(self.height / 2.0)
            .max(0.0)
    }
}

/// Partial update of a rectangle. `Some(None)` clears an optional color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectanglePatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<Option<Color>>,
    pub stroke: Option<Option<Color>>,
    pub stroke_width: Option<f64>,
    pub corner_radius: Option<f64>,
}

impl RectanglePatch {
    pub(crate) fn apply(&self, rect: &mut Rectangle) {
        if let Some(width) = self.width {
            rect.width = width;
        }
        if let Some(height) = self.height {
            rect.height = height;
        }
        if let Some(fill) = &self.fill {
            rect.fill = fill.clone();
        }
        if let Some(stroke) = &self.stroke {
            rect.stroke = stroke.clone();
        }
        if let Some(stroke_width) = self.stroke_width {
            rect.stroke_width = stroke_width;
        }
        if let Some(corner_radius) = self.corner_radius {
            rect.corner_radius = corner_radius;
        }
    }
}
