//! Selection set and its overlay box.

use crate::board::Board;
use crate::bounds::object_bounds;
use crate::geometry::Aabb;
use crate::shapes::ObjectId;
use kurbo::{Point, Rect};

/// Selected object ids in selection order, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole selection.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    /// Select a single object.
    pub fn select(&mut self, id: ObjectId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add to the selection. Already selected ids are ignored.
    pub fn add(&mut self, id: ObjectId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: &ObjectId) {
        self.ids.retain(|o| o != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop ids the board no longer holds. Returns how many were dropped.
    pub fn retain_existing(&mut self, board: &Board) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| board.contains(id));
        before - self.ids.len()
    }

    /// Union of the world bounds of selected objects present on `board`.
    pub fn bounds(&self, board: &Board) -> Option<Aabb> {
        self.ids
            .iter()
            .filter_map(|id| board.get(id))
            .map(object_bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Selection box in screen space, through the board's camera.
    pub fn overlay_rect(&self, board: &Board) -> Option<Rect> {
        let bounds = self.bounds(board)?;
        let cam = &board.camera;
        let top_left = cam.world_to_screen(Point::new(bounds.x, bounds.y));
        let bottom_right = cam.world_to_screen(Point::new(bounds.right(), bounds.bottom()));
        Some(Rect::from_points(top_left, bottom_right))
    }
}

impl FromIterator<ObjectId> for Selection {
    fn from_iter<T: IntoIterator<Item = ObjectId>>(iter: T) -> Self {
        let mut selection = Selection::new();
        selection.replace(iter);
        selection
    }
}
