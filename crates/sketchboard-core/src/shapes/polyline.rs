//! Point-sequence shapes: lines, arrows and pen strokes.

use crate::color::Color;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An ordered sequence of points relative to the object position.
///
/// Shared by the `line`, `arrow` and `pen` variants; they differ only in how
/// they are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub points: Vec<Point>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Polyline {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            stroke: None,
            stroke_width: 1.0,
        }
    }

    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last segment as `(from, to)`, if there are at least two points.
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Partial update of a polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolylinePatch {
    pub points: Option<Vec<Point>>,
    pub stroke: Option<Option<Color>>,
    pub stroke_width: Option<f64>,
}

impl PolylinePatch {
    pub(crate) fn apply(&self, line: &mut Polyline) {
        if let Some(points) = &self.points {
            line.points = points.clone();
        }
        if let Some(stroke) = &self.stroke {
            line.stroke = stroke.clone();
        }
        if let Some(stroke_width) = self.stroke_width {
            line.stroke_width = stroke_width;
        }
    }
}
