//! Scene renderer: projects a board through its camera onto a surface.

use crate::images::{ImageCache, ImageLoader};
use crate::surface::{Surface, SurfacePath, TextRun};
use kurbo::{Affine, Cap, Join, Point, Rect, RoundedRect, Size, Stroke, Vec2};
use peniko::Color;
use sketchboard_core::shapes::{Ellipse, Image, Polyline, Rectangle, Text};
use sketchboard_core::{Board, BoardObject, Selection, Shape};

/// Grid line color (`#ffffff11`).
pub const GRID_COLOR: Color = Color::from_rgba8(255, 255, 255, 0x11);
/// Selection overlay color (`#3b82f6`).
pub const SELECTION_COLOR: Color = Color::from_rgba8(59, 130, 246, 255);
/// Selection overlay line width in screen pixels.
pub const SELECTION_STROKE_WIDTH: f64 = 1.0;
/// Grid spacing below this many screen pixels is not drawn.
pub const MIN_GRID_SPACING: f64 = 1.0;
/// Arrow head length in world units.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;
/// Half the arrow head base width in world units.
pub const ARROW_HEAD_HALF_WIDTH: f64 = 5.0;

/// Per-frame options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Overrides the board's `showGrid` setting when set.
    pub show_grid: Option<bool>,
    /// Draw a box around these objects.
    pub selection: Option<&'a Selection>,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = Some(show);
        self
    }

    pub fn with_selection(mut self, selection: &'a Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// Draw one frame of `board` into a viewport of `viewport` pixels.
///
/// Images not yet in `images` are requested and skipped for this frame.
pub fn render_scene(
    surface: &mut impl Surface,
    board: &Board,
    viewport: Size,
    options: &RenderOptions<'_>,
    images: &mut ImageCache,
) {
    surface.clear();
    surface.fill(
        &SurfacePath::Rect(Rect::from_origin_size(Point::ZERO, viewport)),
        board.settings.background_color.to_peniko(),
    );

    surface.save();
    surface.transform(board.camera.transform());

    if options.show_grid.unwrap_or(board.settings.show_grid) {
        render_grid(surface, board, viewport);
    }

    for obj in board.objects_ordered().filter(|o| o.is_visible()) {
        render_object(surface, obj, images);
    }

    surface.restore();

    if let Some(rect) = options.selection.and_then(|s| s.overlay_rect(board)) {
        surface.stroke(
            &SurfacePath::Rect(rect),
            &Stroke::new(SELECTION_STROKE_WIDTH),
            SELECTION_COLOR,
        );
    }
}

/// Grid lines covering the visible world, in world units.
fn render_grid(surface: &mut impl Surface, board: &Board, viewport: Size) {
    let cam = &board.camera;
    let size = board.settings.grid_size;
    if !size.is_finite() || cam.zoom <= 0.0 || size * cam.zoom < MIN_GRID_SPACING {
        return;
    }

    let start_x = (cam.x / size).floor() * size;
    let start_y = (cam.y / size).floor() * size;
    let end_x = cam.x + viewport.width / cam.zoom;
    let end_y = cam.y + viewport.height / cam.zoom;
    let stroke = Stroke::new(1.0 / cam.zoom).with_caps(Cap::Butt);

    let mut x = start_x;
    while x < end_x {
        let line = SurfacePath::Polyline(vec![Point::new(x, start_y), Point::new(x, end_y)]);
        surface.stroke(&line, &stroke, GRID_COLOR);
        x += size;
    }

    let mut y = start_y;
    while y < end_y {
        let line = SurfacePath::Polyline(vec![Point::new(start_x, y), Point::new(end_x, y)]);
        surface.stroke(&line, &stroke, GRID_COLOR);
        y += size;
    }
}

fn render_object(surface: &mut impl Surface, obj: &BoardObject, images: &mut ImageCache) {
    surface.save();
    surface.translate(Vec2::new(obj.base.x, obj.base.y));
    if obj.base.rotation != 0.0 {
        surface.rotate(obj.base.rotation);
    }
    surface.set_alpha(obj.base.opacity);

    match &obj.shape {
        Shape::Rect(rect) => render_rect(surface, rect),
        Shape::Ellipse(ellipse) => render_ellipse(surface, ellipse),
        Shape::Line(line) => render_polyline(surface, line, outline_stroke(line.stroke_width)),
        Shape::Arrow(arrow) => render_arrow(surface, arrow),
        Shape::Pen(pen) => render_polyline(surface, pen, pen_stroke(pen.stroke_width)),
        Shape::Text(text) => render_text(surface, text),
        Shape::Image(image) => render_image(surface, image, images),
    }

    surface.restore();
}

/// Square-ended, mitered stroke for outlines and plain lines.
fn outline_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Butt).with_join(Join::Miter)
}

/// Round caps and joins for freehand strokes.
fn pen_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

fn fill_and_stroke(
    surface: &mut impl Surface,
    path: &SurfacePath,
    fill: Option<&sketchboard_core::Color>,
    stroke: Option<&sketchboard_core::Color>,
    stroke_width: f64,
) {
    if let Some(fill) = fill {
        surface.fill(path, fill.to_peniko());
    }
    if let Some(stroke) = stroke.filter(|_| stroke_width > 0.0) {
        surface.stroke(path, &outline_stroke(stroke_width), stroke.to_peniko());
    }
}

fn render_rect(surface: &mut impl Surface, rect: &Rectangle) {
    let bounds = Rect::new(0.0, 0.0, rect.width, rect.height);
    let path = if rect.corner_radius > 0.0 {
        SurfacePath::RoundedRect(RoundedRect::from_rect(bounds, rect.effective_corner_radius()))
    } else {
        SurfacePath::Rect(bounds)
    };
    fill_and_stroke(surface, &path, rect.fill.as_ref(), rect.stroke.as_ref(), rect.stroke_width);
}

fn render_ellipse(surface: &mut impl Surface, ellipse: &Ellipse) {
    let path = SurfacePath::Ellipse(kurbo::Ellipse::from_rect(Rect::new(
        0.0,
        0.0,
        ellipse.width,
        ellipse.height,
    )));
    fill_and_stroke(
        surface,
        &path,
        ellipse.fill.as_ref(),
        ellipse.stroke.as_ref(),
        ellipse.stroke_width,
    );
}

/// Stroke color of a point shape; a missing color strokes transparent.
fn polyline_color(line: &Polyline) -> Color {
    line.stroke.as_ref().map_or(Color::TRANSPARENT, |c| c.to_peniko())
}

fn render_polyline(surface: &mut impl Surface, line: &Polyline, stroke: Stroke) {
    if line.points.len() < 2 || line.stroke_width <= 0.0 {
        return;
    }
    surface.stroke(&SurfacePath::Polyline(line.points.clone()), &stroke, polyline_color(line));
}

fn render_arrow(surface: &mut impl Surface, arrow: &Polyline) {
    render_polyline(surface, arrow, outline_stroke(arrow.stroke_width));
    if let Some((from, tip)) = arrow.last_segment() {
        surface.fill(&SurfacePath::Polygon(arrow_head(from, tip).to_vec()), polyline_color(arrow));
    }
}

/// Triangle at `tip` pointing along `from -> tip`.
pub fn arrow_head(from: Point, tip: Point) -> [Point; 3] {
    let angle = (tip.y - from.y).atan2(tip.x - from.x);
    let to_world = Affine::translate(tip.to_vec2()) * Affine::rotate(angle);
    [
        tip,
        to_world * Point::new(-ARROW_HEAD_LENGTH, ARROW_HEAD_HALF_WIDTH),
        to_world * Point::new(-ARROW_HEAD_LENGTH, -ARROW_HEAD_HALF_WIDTH),
    ]
}

fn render_text(surface: &mut impl Surface, text: &Text) {
    surface.draw_text(&TextRun {
        text: text.text.clone(),
        origin: Point::ZERO,
        font: text.font(),
        align: text.align,
        color: text.color.to_peniko(),
        max_width: text.width,
    });
}

fn render_image(surface: &mut impl Surface, image: &Image, images: &mut ImageCache) {
    if let Some(data) = images.get_or_request(&image.src) {
        surface.draw_image(data, Rect::new(0.0, 0.0, image.width, image.height));
    }
}

/// Owns the image cache across frames and polls it before drawing.
#[derive(Debug)]
pub struct SceneRenderer {
    images: ImageCache,
}

impl SceneRenderer {
    pub fn new(loader: impl ImageLoader + 'static) -> Self {
        Self {
            images: ImageCache::new(loader),
        }
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageCache {
        &mut self.images
    }

    /// Whether an image finished loading since the last call.
    pub fn needs_repaint(&self) -> bool {
        self.images.take_repaint()
    }

    /// Pick up finished image loads, then draw the frame.
    pub fn render(
        &mut self,
        surface: &mut impl Surface,
        board: &Board,
        viewport: Size,
        options: &RenderOptions<'_>,
    ) {
        self.images.poll();
        render_scene(surface, board, viewport, options, &mut self.images);
    }
}
