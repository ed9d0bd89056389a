//! Shape definitions for the whiteboard.
//!
//! Every object on a board is a [`BoardObject`]: the placement and visibility
//! fields shared by all variants plus one [`Shape`] variant. The variant set is
//! closed; bounds, hit testing and rendering all match on it exhaustively.

mod ellipse;
mod image;
mod patch;
mod polyline;
mod rectangle;
mod text;

pub use ellipse::{Ellipse, EllipsePatch};
pub use image::{Image, ImagePatch};
pub use patch::{ObjectPatch, ShapePatch};
pub use polyline::{Polyline, PolylinePatch};
pub use rectangle::{Rectangle, RectanglePatch};
pub use text::{FontWeight, Text, TextAlign, TextPatch, WeightKeyword};

use crate::clock::{self, Timestamp};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for board objects.
///
/// Opaque text; freshly created objects get a UUID v4. Stable for the object's
/// lifetime and across undo/redo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Variant tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Line,
    Arrow,
    Pen,
    Text,
    Image,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Pen => "pen",
            ShapeKind::Text => "text",
            ShapeKind::Image => "image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Variant-specific shape data, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect(Rectangle),
    Ellipse(Ellipse),
    Line(Polyline),
    /// Polyline with an arrow head at the last point.
    Arrow(Polyline),
    /// Freehand stroke, drawn with round caps and joins.
    Pen(Polyline),
    Text(Text),
    Image(Image),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Pen(_) => ShapeKind::Pen,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Image(_) => ShapeKind::Image,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// Fields shared by every object variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBase {
    pub id: ObjectId,
    /// Left edge (or polyline origin) in world coordinates.
    pub x: f64,
    /// Top edge (or polyline origin) in world coordinates.
    pub y: f64,
    /// Rotation in radians around the object position.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
    /// Opacity in [0, 1].
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked objects render but cannot be picked.
    #[serde(default)]
    pub locked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An object on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardObject {
    #[serde(flatten)]
    pub base: ObjectBase,
    #[serde(flatten)]
    pub shape: Shape,
}

impl BoardObject {
    /// Create a visible, unlocked, fully opaque object with a fresh id.
    pub fn new(position: Point, shape: impl Into<Shape>) -> Self {
        let now = clock::now_ms();
        Self {
            base: ObjectBase {
                id: ObjectId::new(),
                x: position.x,
                y: position.y,
                rotation: 0.0,
                z_index: 0,
                opacity: 1.0,
                visible: true,
                locked: false,
                created_at: now,
                updated_at: now,
            },
            shape: shape.into(),
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.base.id = id.into();
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.base.rotation = rotation;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.base.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.base.visible = visible;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.base.locked = locked;
        self
    }

    pub fn id(&self) -> &ObjectId {
        &self.base.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn position(&self) -> Point {
        Point::new(self.base.x, self.base.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.base.x = position.x;
        self.base.y = position.y;
    }

    pub fn is_visible(&self) -> bool {
        self.base.visible
    }

    pub fn is_locked(&self) -> bool {
        self.base.locked
    }

    /// Whether the object can be picked by the pointer.
    pub fn is_pickable(&self) -> bool {
        self.base.visible && !self.base.locked
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rect(shape)
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Text> for Shape {
    fn from(shape: Text) -> Self {
        Shape::Text(shape)
    }
}

impl From<Image> for Shape {
    fn from(shape: Image) -> Self {
        Shape::Image(shape)
    }
}
