//! Board document: objects, paint order, camera, settings and metadata.
//!
//! A [`Board`] is a value. Edits never mutate the board a caller holds; they
//! produce a new board (see [`crate::command`]). Objects sit behind [`Arc`], so
//! the copy shares every object the edit did not touch.

use crate::bounds::object_bounds;
use crate::camera::Camera;
use crate::clock::{self, Timestamp};
use crate::color::Color;
use crate::geometry::Aabb;
use crate::shapes::{BoardObject, ObjectId, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Current document schema version.
pub const BOARD_VERSION: u32 = 1;

/// Board errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("Object already exists: {0}")]
    DuplicateObject(ObjectId),
    #[error("Patch for {found} does not apply to {expected} object {id}")]
    VariantMismatch {
        id: ObjectId,
        expected: ShapeKind,
        found: ShapeKind,
    },
    #[error("Paint order does not match objects: {0}")]
    OrderMismatch(String),
    #[error("Invalid camera zoom: {0}")]
    InvalidZoom(f64),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMeta {
    pub id: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Board-wide display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    pub background_color: Color,
    pub show_grid: bool,
    /// Grid spacing in world units.
    pub grid_size: f64,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            background_color: Color::black(),
            show_grid: false,
            grid_size: 50.0,
        }
    }
}

/// Partial update of [`BoardSettings`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub background_color: Option<Color>,
    pub show_grid: Option<bool>,
    pub grid_size: Option<f64>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &BoardSettings) -> BoardSettings {
        BoardSettings {
            background_color: self
                .background_color
                .clone()
                .unwrap_or_else(|| settings.background_color.clone()),
            show_grid: self.show_grid.unwrap_or(settings.show_grid),
            grid_size: self.grid_size.unwrap_or(settings.grid_size),
        }
    }
}

/// The canonical document.
///
/// Invariant: `order` holds exactly the keys of `objects`, each once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub version: u32,
    pub meta: BoardMeta,
    objects: HashMap<ObjectId, Arc<BoardObject>>,
    /// Paint order, back to front.
    order: Vec<ObjectId>,
    pub camera: Camera,
    pub settings: BoardSettings,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        let now = clock::now_ms();
        Self {
            version: BOARD_VERSION,
            meta: BoardMeta {
                id: Uuid::new_v4().to_string(),
                name: "Untitled Board".to_string(),
                created_at: now,
                updated_at: now,
            },
            objects: HashMap::new(),
            order: Vec::new(),
            camera: Camera::default(),
            settings: BoardSettings::default(),
        }
    }

    /// Build a board from objects listed back to front.
    pub fn from_objects(
        objects: impl IntoIterator<Item = BoardObject>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for object in objects {
            if board.objects.contains_key(object.id()) {
                return Err(BoardError::DuplicateObject(object.id().clone()));
            }
            board.insert_object(Arc::new(object), None);
        }
        Ok(board)
    }

    /// Get an object by ID.
    pub fn get(&self, id: &ObjectId) -> Option<&BoardObject> {
        self.objects.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Paint order, back to front.
    pub fn order(&self) -> &[ObjectId] {
        &self.order
    }

    /// Paint-order index of an object.
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.order.iter().position(|o| o == id)
    }

    /// Get objects in paint order (back to front).
    pub fn objects_ordered(&self) -> impl DoubleEndedIterator<Item = &BoardObject> {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// Check if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Union of all object bounds.
    pub fn bounds(&self) -> Option<Aabb> {
        self.objects_ordered()
            .map(object_bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Whether two boards hold the very same object allocation for `id`.
    pub fn shares_object(&self, other: &Board, id: &ObjectId) -> bool {
        match (self.objects.get(id), other.objects.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Check the paint-order invariant and that the camera zoom is usable.
    pub fn validate(&self) -> Result<(), BoardError> {
        let zoom = self.camera.zoom;
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(BoardError::InvalidZoom(zoom));
        }
        let mut seen = HashSet::with_capacity(self.order.len());
        for id in &self.order {
            if !seen.insert(id) {
                return Err(BoardError::OrderMismatch(format!("{id} listed twice")));
            }
            if !self.objects.contains_key(id) {
                return Err(BoardError::OrderMismatch(format!("{id} has no object")));
            }
        }
        if let Some((id, _)) = self.objects.iter().find(|(id, _)| !seen.contains(id)) {
            return Err(BoardError::OrderMismatch(format!("{id} missing from order")));
        }
        if let Some((key, obj)) = self.objects.iter().find(|(key, obj)| *key != obj.id()) {
            return Err(BoardError::OrderMismatch(format!(
                "key {key} holds object {}",
                obj.id()
            )));
        }
        Ok(())
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a board from JSON, rejecting broken paint orders.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let board: Board = serde_json::from_str(json)?;
        board.validate()?;
        Ok(board)
    }

    pub(crate) fn object_arc(&self, id: &ObjectId) -> Option<&Arc<BoardObject>> {
        self.objects.get(id)
    }

    /// Insert at a paint-order index (clamped), or on top when `None`.
    pub(crate) fn insert_object(&mut self, object: Arc<BoardObject>, index: Option<usize>) {
        let id = object.id().clone();
        self.order.retain(|o| *o != id);
        let index = index.unwrap_or(self.order.len()).min(self.order.len());
        self.order.insert(index, id.clone());
        self.objects.insert(id, object);
    }

    /// Remove an object, returning it with its former paint-order index.
    pub(crate) fn take_object(&mut self, id: &ObjectId) -> Option<(Arc<BoardObject>, usize)> {
        let object = self.objects.remove(id)?;
        let index = self.index_of(id).unwrap_or(self.order.len());
        self.order.retain(|o| o != id);
        Some((object, index))
    }

    /// Replace an existing object in place. Unknown ids are ignored.
    pub(crate) fn replace_object(&mut self, object: Arc<BoardObject>) {
        if let Some(slot) = self.objects.get_mut(object.id()) {
            *slot = object;
        }
    }

    /// Mutate an existing object, cloning it out of shared storage.
    pub(crate) fn modify_object(&mut self, id: &ObjectId, f: impl FnOnce(&mut BoardObject)) {
        if let Some(slot) = self.objects.get_mut(id) {
            f(Arc::make_mut(slot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn rect(id: &str, x: f64) -> BoardObject {
        BoardObject::new(Point::new(x, 0.0), Rectangle::new(10.0, 10.0)).with_id(id)
    }

    fn ids(ids: &[&str]) -> Vec<ObjectId> {
        ids.iter().map(|&id| ObjectId::from(id)).collect()
    }

    #[test]
    fn test_empty_board_defaults() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.version, BOARD_VERSION);
        assert_eq!(board.meta.name, "Untitled Board");
        assert_eq!(board.settings.background_color.as_str(), "#000000");
        assert!(!board.settings.show_grid);
        assert!((board.settings.grid_size - 50.0).abs() < f64::EPSILON);
        assert_eq!(board.camera, Camera::default());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_from_objects_keeps_order() {
        let board = Board::from_objects([rect("a", 0.0), rect("b", 5.0)]).unwrap();
        assert_eq!(board.order(), ids(&["a", "b"]).as_slice());
        assert_eq!(board.len(), 2);
        assert_eq!(board.index_of(&"b".into()), Some(1));
    }

    #[test]
    fn test_from_objects_rejects_duplicates() {
        let result = Board::from_objects([rect("a", 0.0), rect("a", 5.0)]);
        assert!(matches!(result, Err(BoardError::DuplicateObject(_))));
    }

    #[test]
    fn test_insert_at_index_and_take() {
        let mut board = Board::from_objects([rect("a", 0.0), rect("b", 5.0)]).unwrap();
        board.insert_object(Arc::new(rect("c", 1.0)), Some(1));
        assert_eq!(board.order(), ids(&["a", "c", "b"]).as_slice());

        let (obj, index) = board.take_object(&"c".into()).unwrap();
        assert_eq!(obj.id().as_str(), "c");
        assert_eq!(index, 1);
        assert!(board.take_object(&"c".into()).is_none());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_bounds_union() {
        let board = Board::from_objects([rect("a", 0.0), rect("b", 90.0)]).unwrap();
        assert_eq!(board.bounds(), Some(Aabb::new(0.0, 0.0, 100.0, 10.0)));
        assert_eq!(Board::new().bounds(), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut board = Board::from_objects([rect("a", 0.0), rect("b", 5.0)]).unwrap();
        board.camera = Camera::new(1.0, 2.0, 3.0);
        let json = board.to_json().unwrap();
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"createdAt\""));
        let back = Board::from_json(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_from_json_rejects_dangling_order() {
        let board = Board::from_objects([rect("a", 0.0)]).unwrap();
        let mut value = serde_json::to_value(&board).unwrap();
        value["order"] = serde_json::json!(["a", "ghost"]);
        let result = Board::from_json(&value.to_string());
        assert!(matches!(result, Err(BoardError::OrderMismatch(_))));
    }

    #[test]
    fn test_from_json_rejects_zero_zoom() {
        let mut value = serde_json::to_value(Board::new()).unwrap();
        value["camera"]["zoom"] = serde_json::json!(0.0);
        let result = Board::from_json(&value.to_string());
        assert!(matches!(result, Err(BoardError::InvalidZoom(z)) if z == 0.0));

        value["camera"]["zoom"] = serde_json::json!(-2.0);
        assert!(Board::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_from_json_rejects_missing_order_entry() {
        let board = Board::from_objects([rect("a", 0.0), rect("b", 0.0)]).unwrap();
        let mut value = serde_json::to_value(&board).unwrap();
        value["order"] = serde_json::json!(["a"]);
        assert!(Board::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_settings_patch() {
        let settings = BoardSettings::default();
        let next = SettingsPatch {
            show_grid: Some(true),
            ..Default::default()
        }
        .apply(&settings);
        assert!(next.show_grid);
        assert_eq!(next.background_color, settings.background_color);
        assert!((next.grid_size - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_modify_object_copies_on_write() {
        let board = Board::from_objects([rect("a", 0.0), rect("b", 5.0)]).unwrap();
        let mut next = board.clone();
        next.modify_object(&"a".into(), |o| o.base.x = 99.0);
        assert!((board.get(&"a".into()).unwrap().base.x - 0.0).abs() < f64::EPSILON);
        assert!((next.get(&"a".into()).unwrap().base.x - 99.0).abs() < f64::EPSILON);
        assert!(!board.shares_object(&next, &"a".into()));
        assert!(board.shares_object(&next, &"b".into()));
    }
}
