//! Ellipse shape.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the box `(0, 0, width, height)` relative to its
/// object position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Ellipse {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: None,
            stroke: None,
            stroke_width: 1.0,
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

    /// Horizontal and vertical radii.
    pub fn radii(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Partial update of an ellipse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EllipsePatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<Option<Color>>,
    pub stroke: Option<Option<Color>>,
    pub stroke_width: Option<f64>,
}

impl EllipsePatch {
    pub(crate) fn apply(&self, ellipse: &mut Ellipse) {
        if let Some(width) = self.width {
            ellipse.width = width;
        }
        if let Some(height) = self.height {
            ellipse.height = height;
        }
        if let Some(fill) = &self.fill {
            ellipse.fill = fill.clone();
        }
        if let Some(stroke) = &self.stroke {
            ellipse.stroke = stroke.clone();
        }
        if let Some(stroke_width) = self.stroke_width {
            ellipse.stroke_width = stroke_width;
        }
    }
}
