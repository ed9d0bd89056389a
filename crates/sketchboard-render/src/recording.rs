//! Display-list surface.
//!
//! [`RecordingSurface`] keeps every draw call together with the transform and
//! alpha in effect when it was made. Hosts replay the list onto a real backend;
//! tests inspect it directly.

use crate::surface::{Surface, SurfacePath, TextRun};
use kurbo::{Affine, Cap, Join, Rect, Stroke};
use peniko::{Color, ImageData};

/// Stroke parameters kept by a recorded stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: Cap,
    pub join: Join,
}

impl StrokeStyle {
    fn from_stroke(stroke: &Stroke) -> Self {
        Self {
            width: stroke.width,
            cap: stroke.start_cap,
            join: stroke.join,
        }
    }

    fn to_stroke(self) -> Stroke {
        Stroke::new(self.width).with_caps(self.cap).with_join(self.join)
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: SurfacePath,
        color: Color,
    },
    Stroke {
        path: SurfacePath,
        style: StrokeStyle,
        color: Color,
    },
    Text(TextRun),
    Image {
        image: ImageData,
        dest: Rect,
    },
}

/// A draw call with the state it was made in.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub transform: Affine,
    pub alpha: f64,
    pub command: DrawCommand,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    transform: Affine,
    alpha: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Surface that records draw calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    state: State,
    stack: Vec<State>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of times the surface was cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_transform(&self) -> Affine {
        self.state.transform
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op.command, DrawCommand::Fill { .. }))
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op.command, DrawCommand::Stroke { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = (&DrawOp, &TextRun)> {
        self.ops.iter().filter_map(|op| match &op.command {
            DrawCommand::Text(run) => Some((op, run)),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op.command, DrawCommand::Image { .. }))
    }

    /// Replay the recorded calls onto another surface.
    pub fn replay(&self, target: &mut impl Surface) {
        target.clear();
        for op in &self.ops {
            target.save();
            target.transform(op.transform);
            target.set_alpha(op.alpha);
            match &op.command {
                DrawCommand::Fill { path, color } => target.fill(path, *color),
                DrawCommand::Stroke { path, style, color } => {
                    target.stroke(path, &style.to_stroke(), *color)
                }
                DrawCommand::Text(run) => target.draw_text(run),
                DrawCommand::Image { image, dest } => target.draw_image(image, *dest),
            }
            target.restore();
        }
    }

    fn record(&mut self, command: DrawCommand) {
        self.ops.push(DrawOp {
            transform: self.state.transform,
            alpha: self.state.alpha,
            command,
        });
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.state.transform *= affine;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill(&mut self, path: &SurfacePath, color: Color) {
        self.record(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke(&mut self, path: &SurfacePath, style: &Stroke, color: Color) {
        self.record(DrawCommand::Stroke {
            path: path.clone(),
            style: StrokeStyle::from_stroke(style),
            color,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.record(DrawCommand::Text(run.clone()));
    }

    fn draw_image(&mut self, image: &ImageData, dest: Rect) {
        self.record(DrawCommand::Image {
            image: image.clone(),
            dest,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, Point, Vec2};

    #[test]
    fn test_save_restore_transform_and_alpha() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.translate(Vec2::new(10.0, 0.0));
        surface.scale(2.0);
        surface.set_alpha(0.5);
        surface.fill(&SurfacePath::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)), Color::WHITE);
        surface.restore();
        surface.fill(&SurfacePath::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)), Color::WHITE);

        let ops = surface.ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].transform * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
        assert!((ops[0].alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(ops[1].transform, Affine::IDENTITY);
        assert!((ops[1].alpha - 1.0).abs() < f64::EPSILON);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore_ignored() {
        let mut surface = RecordingSurface::new();
        surface.translate(Vec2::new(3.0, 4.0));
        surface.restore();
        assert_eq!(surface.current_transform(), Affine::translate((3.0, 4.0)));
    }

    #[test]
    fn test_clear_drops_ops() {
        let mut surface = RecordingSurface::new();
        surface.fill(&SurfacePath::Rect(Rect::ZERO), Color::BLACK);
        surface.clear();
        assert!(surface.ops().is_empty());
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn test_replay_reproduces_ops() {
        let mut surface = RecordingSurface::new();
        surface.translate(Vec2::new(5.0, 5.0));
        surface.set_alpha(0.25);
        surface.stroke(
            &SurfacePath::Polyline(vec![Point::ZERO, Point::new(1.0, 1.0)]),
            &Stroke::new(2.0).with_caps(Cap::Round).with_join(Join::Round),
            Color::BLACK,
        );

        let mut copy = RecordingSurface::new();
        surface.replay(&mut copy);
        assert_eq!(copy.ops(), surface.ops());
        assert_eq!(copy.depth(), 0);
    }

    #[test]
    fn test_replay_arbitrary_path() {
        let mut curve = BezPath::new();
        curve.move_to((0.0, 0.0));
        curve.curve_to((1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        curve.close_path();

        let mut surface = RecordingSurface::new();
        surface.fill(&SurfacePath::Path(curve.clone()), Color::WHITE);
        let mut copy = RecordingSurface::new();
        surface.replay(&mut copy);

        assert_eq!(copy.ops(), surface.ops());
        match copy.fills().next().map(|op| &op.command) {
            Some(DrawCommand::Fill { path, .. }) => assert_eq!(path.to_bez_path(), curve),
            other => panic!("expected fill, got {other:?}"),
        }
    }
}
