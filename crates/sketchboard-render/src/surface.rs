//! Drawing-surface abstraction.
//!
//! A [`Surface`] is a stateful 2D context in the style of an HTML canvas: a
//! current transform and alpha that `save`/`restore` push and pop, and draw
//! calls interpreted in the current transform.

use kurbo::{Affine, BezPath, Ellipse, Point, Rect, RoundedRect, Shape as _, Stroke, Vec2};
use peniko::{Color, ImageData};
use sketchboard_core::shapes::TextAlign;

/// Geometry handed to fill and stroke calls, in the current transform.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfacePath {
    Rect(Rect),
    RoundedRect(RoundedRect),
    Ellipse(Ellipse),
    /// Open path through the points.
    Polyline(Vec<Point>),
    /// Closed path through the points.
    Polygon(Vec<Point>),
    /// Arbitrary path.
    Path(BezPath),
}

impl SurfacePath {
    /// Flatten into a kurbo path.
    pub fn to_bez_path(&self) -> BezPath {
        const TOLERANCE: f64 = 0.1;
        match self {
            SurfacePath::Rect(rect) => rect.to_path(TOLERANCE),
            SurfacePath::RoundedRect(rect) => rect.to_path(TOLERANCE),
            SurfacePath::Ellipse(ellipse) => ellipse.to_path(TOLERANCE),
            SurfacePath::Path(path) => path.clone(),
            SurfacePath::Polyline(points) | SurfacePath::Polygon(points) => {
                let mut path = BezPath::new();
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    path.move_to(*first);
                    for p in iter {
                        path.line_to(*p);
                    }
                    if matches!(self, SurfacePath::Polygon(_)) {
                        path.close_path();
                    }
                }
                path
            }
        }
    }
}

/// A single line of text anchored at `origin` with a top baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub origin: Point,
    /// CSS-style font shorthand, e.g. `"600 16px Inter"`.
    pub font: String,
    pub align: TextAlign,
    pub color: Color,
    /// Advisory maximum width.
    pub max_width: f64,
}

/// A 2D drawing context.
pub trait Surface {
    /// Wipe everything drawn so far.
    fn clear(&mut self);

    /// Push the current transform and alpha.
    fn save(&mut self);

    /// Pop back to the last saved transform and alpha. Unbalanced calls are
    /// ignored.
    fn restore(&mut self);

    /// Post-multiply the current transform, as canvas `transform()` does.
    fn transform(&mut self, affine: Affine);

    fn translate(&mut self, offset: Vec2) {
        self.transform(Affine::translate(offset));
    }

    fn scale(&mut self, factor: f64) {
        self.transform(Affine::scale(factor));
    }

    fn rotate(&mut self, radians: f64) {
        self.transform(Affine::rotate(radians));
    }

    /// Set the alpha applied to subsequent draws.
    fn set_alpha(&mut self, alpha: f64);

    fn fill(&mut self, path: &SurfacePath, color: Color);

    fn stroke(&mut self, path: &SurfacePath, style: &Stroke, color: Color);

    fn draw_text(&mut self, run: &TextRun);

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &ImageData, dest: Rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    #[test]
    fn test_polygon_closes() {
        let tri =
            SurfacePath::Polygon(vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)]);
        let path = tri.to_bez_path();
        assert!(matches!(path.elements().last(), Some(kurbo::PathEl::ClosePath)));

        let line = SurfacePath::Polyline(vec![Point::ZERO, Point::new(1.0, 0.0)]);
        assert_eq!(line.to_bez_path().elements().len(), 2);
        assert!(SurfacePath::Polyline(Vec::new()).to_bez_path().elements().is_empty());
    }

    #[test]
    fn test_arbitrary_path_passes_through() {
        let mut curve = BezPath::new();
        curve.move_to((0.0, 0.0));
        curve.quad_to((5.0, 10.0), (10.0, 0.0));
        let path = SurfacePath::Path(curve.clone());
        assert_eq!(path.to_bez_path(), curve);
    }

    #[test]
    fn test_shape_paths_bounds() {
        let rect = SurfacePath::Rect(Rect::new(0.0, 0.0, 10.0, 5.0));
        let bbox = rect.to_bez_path().bounding_box();
        assert!((bbox.width() - 10.0).abs() < 1e-9);
        assert!((bbox.height() - 5.0).abs() < 1e-9);
    }
}
