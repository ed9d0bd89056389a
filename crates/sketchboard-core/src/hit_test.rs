//! Topmost-object picking.

use crate::bounds::object_bounds;
use crate::board::Board;
use crate::shapes::ObjectId;
use kurbo::Point;

/// Find the topmost pickable object whose bounds contain `world`.
///
/// Scans paint order front to back, skipping hidden and locked objects. Linear
/// in the number of objects.
pub fn hit_test(board: &Board, world: Point) -> Option<ObjectId> {
    board
        .objects_ordered()
        .rev()
        .filter(|obj| obj.is_pickable())
        .find(|obj| object_bounds(obj).contains(world))
        .map(|obj| obj.id().clone())
}

/// All pickable objects under `world`, front to back.
pub fn hit_test_all(board: &Board, world: Point) -> Vec<ObjectId> {
    board
        .objects_ordered()
        .rev()
        .filter(|obj| obj.is_pickable() && object_bounds(obj).contains(world))
        .map(|obj| obj.id().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BoardObject, Polyline, Rectangle, Shape};

    fn rect(id: &str, x: f64, y: f64) -> BoardObject {
        BoardObject::new(Point::new(x, y), Rectangle::new(100.0, 100.0)).with_id(id)
    }

    #[test]
    fn test_topmost_wins() {
        let board =
            Board::from_objects([rect("back", 0.0, 0.0), rect("front", 50.0, 50.0)]).unwrap();
        assert_eq!(hit_test(&board, Point::new(75.0, 75.0)), Some("front".into()));
        assert_eq!(hit_test(&board, Point::new(25.0, 25.0)), Some("back".into()));
        assert_eq!(hit_test(&board, Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_skips_hidden_and_locked() {
        let board = Board::from_objects([
            rect("back", 0.0, 0.0),
            rect("locked", 0.0, 0.0).with_locked(true),
            rect("hidden", 0.0, 0.0).with_visible(false),
        ])
        .unwrap();
        assert_eq!(hit_test(&board, Point::new(10.0, 10.0)), Some("back".into()));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let board = Board::from_objects([rect("a", 0.0, 0.0)]).unwrap();
        assert_eq!(hit_test(&board, Point::new(100.0, 100.0)), Some("a".into()));
        assert_eq!(hit_test(&board, Point::new(100.001, 100.0)), None);
    }

    #[test]
    fn test_empty_line_hit_only_at_anchor() {
        let line = BoardObject::new(
            Point::new(5.0, 5.0),
            Shape::Line(Polyline::from_points(vec![])),
        )
        .with_id("l");
        let board = Board::from_objects([line]).unwrap();
        assert_eq!(hit_test(&board, Point::new(5.0, 5.0)), Some("l".into()));
        assert_eq!(hit_test(&board, Point::new(5.0, 6.0)), None);
    }

    #[test]
    fn test_hit_all_front_to_back() {
        let board = Board::from_objects([rect("a", 0.0, 0.0), rect("b", 50.0, 50.0)]).unwrap();
        let hits = hit_test_all(&board, Point::new(75.0, 75.0));
        assert_eq!(hits, vec![ObjectId::from("b"), ObjectId::from("a")]);
    }
}
