//! Pointer tools.

mod pan;
mod select;

pub use pan::PanGesture;
pub use select::{DragState, SelectTool, Snapshot};

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
}
