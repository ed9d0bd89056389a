//! Partial updates of board objects.

use super::{
    BoardObject, EllipsePatch, ImagePatch, PolylinePatch, RectanglePatch, Shape, ShapeKind,
    TextPatch,
};
use crate::board::BoardError;
use crate::clock::Timestamp;

/// Variant-specific part of an object patch.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePatch {
    Rect(RectanglePatch),
    Ellipse(EllipsePatch),
    Line(PolylinePatch),
    Arrow(PolylinePatch),
    Pen(PolylinePatch),
    Text(TextPatch),
    Image(ImagePatch),
}

impl ShapePatch {
    /// The variant this patch applies to.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapePatch::Rect(_) => ShapeKind::Rect,
            ShapePatch::Ellipse(_) => ShapeKind::Ellipse,
            ShapePatch::Line(_) => ShapeKind::Line,
            ShapePatch::Arrow(_) => ShapeKind::Arrow,
            ShapePatch::Pen(_) => ShapeKind::Pen,
            ShapePatch::Text(_) => ShapeKind::Text,
            ShapePatch::Image(_) => ShapeKind::Image,
        }
    }
}

/// Partial update of a board object.
///
/// Covers the shared placement fields and the fields of one variant. The id,
/// the variant tag and the creation time cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub shape: Option<ShapePatch>,
}

impl ObjectPatch {
    /// Patch that only moves the object.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Patch that only touches variant fields.
    pub fn shape(shape: ShapePatch) -> Self {
        Self {
            shape: Some(shape),
            ..Default::default()
        }
    }

    /// Produce the patched copy of `object`, stamped with `updated_at`.
    pub fn apply(
        &self,
        object: &BoardObject,
        updated_at: Timestamp,
    ) -> Result<BoardObject, BoardError> {
        let mut next = object.clone();
        let base = &mut next.base;
        if let Some(x) = self.x {
            base.x = x;
        }
        if let Some(y) = self.y {
            base.y = y;
        }
        if let Some(rotation) = self.rotation {
            base.rotation = rotation;
        }
        if let Some(z_index) = self.z_index {
            base.z_index = z_index;
        }
        if let Some(opacity) = self.opacity {
            base.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(visible) = self.visible {
            base.visible = visible;
        }
        if let Some(locked) = self.locked {
            base.locked = locked;
        }
        base.updated_at = updated_at;

        if let Some(patch) = &self.shape {
            match (patch, &mut next.shape) {
                (ShapePatch::Rect(p), Shape::Rect(s)) => p.apply(s),
                (ShapePatch::Ellipse(p), Shape::Ellipse(s)) => p.apply(s),
                (ShapePatch::Line(p), Shape::Line(s))
                | (ShapePatch::Arrow(p), Shape::Arrow(s))
                | (ShapePatch::Pen(p), Shape::Pen(s)) => p.apply(s),
                (ShapePatch::Text(p), Shape::Text(s)) => p.apply(s),
                (ShapePatch::Image(p), Shape::Image(s)) => p.apply(s),
                (patch, shape) => {
                    return Err(BoardError::VariantMismatch {
                        id: object.id().clone(),
                        expected: shape.kind(),
                        found: patch.kind(),
                    });
                }
            }
        }
        Ok(next)
    }
}
