//! Per-variant bounding boxes.

use crate::geometry::Aabb;
use crate::shapes::{BoardObject, Shape};

/// World-space bounding box of an object.
///
/// Rotation is not taken into account; boxes are in the object's unrotated
/// frame. Text uses a single-line height of `font_size * 1.2`. Point
/// sequences are offset by the object position; an empty sequence yields a
/// zero-size box at the position.
pub fn object_bounds(obj: &BoardObject) -> Aabb {
    let (x, y) = (obj.base.x, obj.base.y);
    match &obj.shape {
        Shape::Rect(r) => Aabb::new(x, y, r.width, r.height),
        Shape::Ellipse(e) => Aabb::new(x, y, e.width, e.height),
        Shape::Image(i) => Aabb::new(x, y, i.width, i.height),
        Shape::Text(t) => Aabb::new(x, y, t.width, t.line_height()),
        Shape::Line(p) | Shape::Arrow(p) | Shape::Pen(p) => Aabb::from_points(&p.points)
            .map(|b| b.offset(x, y))
            .unwrap_or_else(|| Aabb::at(obj.position())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Image, Polyline, Rectangle, Text};
    use kurbo::Point;

    #[test]
    fn test_box_shapes() {
        let at = Point::new(10.0, 20.0);
        let expected = Aabb::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(object_bounds(&BoardObject::new(at, Rectangle::new(100.0, 50.0))), expected);
        assert_eq!(object_bounds(&BoardObject::new(at, Ellipse::new(100.0, 50.0))), expected);
        assert_eq!(
            object_bounds(&BoardObject::new(at, Image::new("x.png", 100.0, 50.0))),
            expected
        );
    }

    #[test]
    fn test_text_single_line_height() {
        let obj = BoardObject::new(Point::new(0.0, 5.0), Text::new("hello", 20.0, 120.0));
        let b = object_bounds(&obj);
        assert!((b.width - 120.0).abs() < f64::EPSILON);
        assert!((b.height - 24.0).abs() < 1e-9);
        assert!((b.y - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_points_offset_by_position() {
        let pts = vec![Point::new(-5.0, 2.0), Point::new(15.0, -8.0), Point::new(0.0, 0.0)];
        for shape in [
            Shape::Line(Polyline::from_points(pts.clone())),
            Shape::Arrow(Polyline::from_points(pts.clone())),
            Shape::Pen(Polyline::from_points(pts.clone())),
        ] {
            let obj = BoardObject::new(Point::new(100.0, 100.0), shape);
            assert_eq!(object_bounds(&obj), Aabb::new(95.0, 92.0, 20.0, 10.0));
        }
    }

    #[test]
    fn test_empty_points_zero_box_at_position() {
        for shape in [
            Shape::Line(Polyline::from_points(vec![])),
            Shape::Arrow(Polyline::from_points(vec![])),
            Shape::Pen(Polyline::from_points(vec![])),
        ] {
            let obj = BoardObject::new(Point::new(7.0, -3.0), shape);
            assert_eq!(object_bounds(&obj), Aabb::new(7.0, -3.0, 0.0, 0.0));
        }
    }
}
