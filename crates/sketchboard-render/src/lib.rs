//! Sketchboard Render Library
//!
//! Drawing-surface abstraction and the scene renderer for Sketchboard boards.
//! Backends implement [`Surface`]; [`RecordingSurface`] is a display list that
//! any backend can replay.

pub mod images;
pub mod recording;
mod renderer;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
pub use images::ThreadedImageLoader;
pub use images::{
    DeferredImageLoader, ImageCache, ImageError, ImageLoader, ImageState, RepaintSignal,
    decode_image, load_source,
};
pub use recording::{DrawCommand, DrawOp, RecordingSurface, StrokeStyle};
pub use renderer::{
    ARROW_HEAD_HALF_WIDTH, ARROW_HEAD_LENGTH, GRID_COLOR, MIN_GRID_SPACING, RenderOptions,
    SELECTION_COLOR, SceneRenderer, arrow_head, render_scene,
};
pub use surface::{Surface, SurfacePath, TextRun};
