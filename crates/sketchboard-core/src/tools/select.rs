//! Select and move: press picks, drag previews, release commits one command.

use crate::board::Board;
use crate::clock::Timestamp;
use crate::command::{Command, ObjectMove};
use crate::hit_test::hit_test;
use crate::selection::Selection;
use crate::shapes::ObjectId;
use kurbo::{Point, Vec2};
use std::borrow::Cow;

/// Position of one dragged object at press time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: ObjectId,
    pub origin: Point,
    pub updated_at: Timestamp,
}

/// State of the select tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// World point of the press.
        press: Point,
        snapshots: Vec<Snapshot>,
        /// Offset from `press` to the latest pointer position, once it moved.
        preview: Option<Vec2>,
    },
}

/// Select/move tool.
///
/// Nothing it does during a drag touches history: moves are kept as a preview
/// offset until release, where they become a single "Move Selection" command.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    state: DragState,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Handle a press at `world`.
    ///
    /// A miss clears the selection. A hit on an unselected object selects only
    /// it; a hit on a selected object keeps the selection so the whole group
    /// drags.
    pub fn pointer_down(&mut self, board: &Board, world: Point, selection: &mut Selection) {
        let Some(hit) = hit_test(board, world) else {
            selection.clear();
            self.state = DragState::Idle;
            return;
        };
        if !selection.contains(&hit) {
            selection.select(hit);
        }

        let snapshots = selection
            .iter()
            .filter_map(|id| board.get(id))
            .map(|obj| Snapshot {
                id: obj.id().clone(),
                origin: obj.position(),
                updated_at: obj.base.updated_at,
            })
            .collect();
        self.state = DragState::Dragging {
            press: world,
            snapshots,
            preview: None,
        };
    }

    /// Update the preview while dragging. Ignored when idle.
    pub fn pointer_move(&mut self, world: Point) {
        if let DragState::Dragging { press, preview, .. } = &mut self.state {
            *preview = Some(world - *press);
        }
    }

    /// Finish the gesture. Returns the move command when the pointer moved
    /// during the drag.
    pub fn pointer_up(&mut self) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                snapshots,
                preview: Some(delta),
                ..
            } if !snapshots.is_empty() => {
                let moves = snapshots
                    .into_iter()
                    .map(|s| ObjectMove {
                        id: s.id,
                        from: s.origin,
                        to: s.origin + delta,
                        updated_before: s.updated_at,
                    })
                    .collect();
                Some(Command::move_selection(moves))
            }
            _ => None,
        }
    }

    /// Abandon any drag without committing.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Preview positions of the dragged objects, if any.
    pub fn preview_positions(&self) -> Vec<(ObjectId, Point)> {
        match &self.state {
            DragState::Dragging {
                snapshots,
                preview: Some(delta),
                ..
            } => snapshots.iter().map(|s| (s.id.clone(), s.origin + *delta)).collect(),
            _ => Vec::new(),
        }
    }

    /// The board as it should be drawn mid-drag.
    pub fn preview_board<'a>(&self, board: &'a Board) -> Cow<'a, Board> {
        let positions = self.preview_positions();
        if positions.is_empty() {
            return Cow::Borrowed(board);
        }
        let mut preview = board.clone();
        for (id, position) in positions {
            preview.modify_object(&id, |obj| obj.set_position(position));
        }
        Cow::Owned(preview)
    }
}
