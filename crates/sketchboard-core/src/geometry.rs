//! Axis-aligned boxes in world space.
//!
//! Points are plain [`kurbo::Point`] values; this module only adds the
//! `{x, y, width, height}` box used by bounds and hit testing.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. `width` and `height` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Zero-size box anchored at a point.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment: points on any edge are inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.right()
            && point.y <= self.bottom()
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Aabb::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    /// Translate by an offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Aabb {
        Aabb { x: self.x + dx, y: self.y + dy, ..*self }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Aabb::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let b = Aabb::new(10.0, 20.0, 100.0, 50.0);
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(b.contains(Point::new(110.0, 70.0)));
        assert!(b.contains(Point::new(60.0, 45.0)));
        assert!(!b.contains(Point::new(110.1, 45.0)));
        assert!(!b.contains(Point::new(9.9, 45.0)));
        assert!(!b.contains(Point::new(60.0, 70.1)));
    }

    #[test]
    fn test_zero_size_box_contains_its_anchor() {
        let b = Aabb::at(Point::new(5.0, 5.0));
        assert!(b.contains(Point::new(5.0, 5.0)));
        assert!(!b.contains(Point::new(5.0, 5.1)));
    }

    #[test]
    fn test_from_points() {
        let pts = [Point::new(3.0, -1.0), Point::new(-2.0, 4.0), Point::new(0.0, 0.0)];
        let b = Aabb::from_points(&pts).unwrap();
        assert_eq!(b, Aabb::new(-2.0, -1.0, 5.0, 5.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_union() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, -5.0, 20.0, 5.0);
        assert_eq!(a.union(&b), Aabb::new(0.0, -5.0, 25.0, 15.0));
    }

    #[test]
    fn test_negative_size_clamped() {
        let b = Aabb::new(0.0, 0.0, -3.0, 2.0);
        assert!((b.width - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rect_conversion() {
        let b = Aabb::new(1.0, 2.0, 3.0, 4.0);
        let r = b.to_rect();
        assert!((r.x1 - 4.0).abs() < f64::EPSILON);
        assert!((r.y1 - 6.0).abs() < f64::EPSILON);
        assert_eq!(Aabb::from(r), b);
    }
}
