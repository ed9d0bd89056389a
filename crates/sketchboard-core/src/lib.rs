//! Sketchboard Core Library
//!
//! Platform-agnostic document model, undo/redo history, hit testing and
//! pointer interaction logic for the Sketchboard whiteboard.

pub mod board;
pub mod bounds;
pub mod camera;
pub mod clock;
pub mod color;
pub mod command;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod hit_test;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use board::{Board, BoardError, BoardMeta, BoardSettings, SettingsPatch, BOARD_VERSION};
pub use bounds::object_bounds;
pub use camera::{Camera, ZoomLimits};
pub use clock::Timestamp;
pub use color::{Color, ColorError};
pub use command::{Command, Edit, ObjectMove, Stamp};
pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use geometry::Aabb;
pub use hit_test::{hit_test, hit_test_all};
pub use history::History;
pub use input::{Modifiers, MouseButton, PointerEvent, WheelEvent, camera_after_wheel};
pub use selection::Selection;
pub use shapes::{BoardObject, ObjectId, ObjectPatch, Shape, ShapeKind, ShapePatch};
pub use tools::{DragState, PanGesture, SelectTool, ToolKind};
