//! Reversible board edits.
//!
//! A [`Command`] captures everything it needs by value when it is built, so
//! [`Command::forward`] and [`Command::inverse`] are pure functions of the board
//! they are given. For the board a command was built against,
//! `cmd.inverse(&cmd.forward(&board)) == board` holds exactly, timestamps
//! included.

use crate::board::{Board, BoardError, BoardSettings, SettingsPatch};
use crate::camera::{Camera, ZoomLimits};
use crate::clock::{self, Timestamp};
use crate::shapes::{BoardObject, ObjectId, ObjectPatch};
use kurbo::Point;
use std::sync::Arc;
use uuid::Uuid;

/// `meta.updatedAt` before and after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    pub before: Timestamp,
    pub after: Timestamp,
}

impl Stamp {
    fn refresh(board: &Board, now: Timestamp) -> Self {
        Self {
            before: board.meta.updated_at,
            after: now,
        }
    }
}

/// One object's part of a move.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMove {
    pub id: ObjectId,
    pub from: Point,
    pub to: Point,
    /// The object's `updatedAt` before the move.
    pub updated_before: Timestamp,
}

/// The edit a command performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddObject {
        object: Arc<BoardObject>,
        stamp: Stamp,
    },
    RemoveObject {
        object: Arc<BoardObject>,
        /// Paint-order index the object had.
        index: usize,
        stamp: Stamp,
    },
    UpdateObject {
        before: Arc<BoardObject>,
        after: Arc<BoardObject>,
        stamp: Stamp,
    },
    SetCamera {
        before: Camera,
        after: Camera,
    },
    SetSettings {
        before: BoardSettings,
        after: BoardSettings,
        stamp: Stamp,
    },
    MoveObjects {
        moves: Vec<ObjectMove>,
        updated_at: Timestamp,
    },
}

/// A named, reversible board transition recorded by the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: String,
    pub name: &'static str,
    pub timestamp: Timestamp,
    edit: Edit,
}

impl Command {
    fn new(name: &'static str, timestamp: Timestamp, edit: Edit) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            timestamp,
            edit,
        }
    }

    /// Add an object on top of the paint order.
    pub fn add_object(board: &Board, object: BoardObject) -> Result<Self, BoardError> {
        if board.contains(object.id()) {
            return Err(BoardError::DuplicateObject(object.id().clone()));
        }
        let now = clock::now_ms();
        Ok(Self::new(
            "Add Object",
            now,
            Edit::AddObject {
                object: Arc::new(object),
                stamp: Stamp::refresh(board, now),
            },
        ))
    }

    /// Patch an existing object. The patched copy is computed here.
    pub fn update_object(
        board: &Board,
        id: &ObjectId,
        patch: &ObjectPatch,
    ) -> Result<Self, BoardError> {
        let before = board
            .object_arc(id)
            .ok_or_else(|| BoardError::ObjectNotFound(id.clone()))?;
        let now = clock::now_ms();
        let after = patch.apply(before, now)?;
        Ok(Self::new(
            "Update Object",
            now,
            Edit::UpdateObject {
                before: Arc::clone(before),
                after: Arc::new(after),
                stamp: Stamp::refresh(board, now),
            },
        ))
    }

    /// Remove an object; undo puts it back at the same paint-order index.
    pub fn remove_object(board: &Board, id: &ObjectId) -> Result<Self, BoardError> {
        let object = board
            .object_arc(id)
            .ok_or_else(|| BoardError::ObjectNotFound(id.clone()))?;
        let index = board.index_of(id).unwrap_or(board.len());
        let now = clock::now_ms();
        Ok(Self::new(
            "Remove Object",
            now,
            Edit::RemoveObject {
                object: Arc::clone(object),
                index,
                stamp: Stamp::refresh(board, now),
            },
        ))
    }

    /// Replace the camera, clamping its zoom into `limits`.
    pub fn set_camera(board: &Board, camera: Camera, limits: &ZoomLimits) -> Self {
        Self::new(
            "Set Camera",
            clock::now_ms(),
            Edit::SetCamera {
                before: board.camera,
                after: camera.clamped(limits),
            },
        )
    }

    /// Merge a settings patch.
    pub fn set_settings(board: &Board, patch: &SettingsPatch) -> Self {
        let now = clock::now_ms();
        Self::new(
            "Update Board Settings",
            now,
            Edit::SetSettings {
                before: board.settings.clone(),
                after: patch.apply(&board.settings),
                stamp: Stamp::refresh(board, now),
            },
        )
    }

    /// Move several objects at once, as a finished drag does.
    pub fn move_selection(moves: Vec<ObjectMove>) -> Self {
        let now = clock::now_ms();
        Self::new(
            "Move Selection",
            now,
            Edit::MoveObjects {
                moves,
                updated_at: now,
            },
        )
    }

    pub fn edit(&self) -> &Edit {
        &self.edit
    }

    /// Apply the command.
    pub fn forward(&self, board: &Board) -> Board {
        let mut next = board.clone();
        match &self.edit {
            Edit::AddObject { object, stamp } => {
                next.insert_object(Arc::clone(object), None);
                next.meta.updated_at = stamp.after;
            }
            Edit::RemoveObject { object, stamp, .. } => {
                next.take_object(object.id());
                next.meta.updated_at = stamp.after;
            }
            Edit::UpdateObject { after, stamp, .. } => {
                next.replace_object(Arc::clone(after));
                next.meta.updated_at = stamp.after;
            }
            Edit::SetCamera { after, .. } => next.camera = *after,
            Edit::SetSettings { after, stamp, .. } => {
                next.settings = after.clone();
                next.meta.updated_at = stamp.after;
            }
            Edit::MoveObjects { moves, updated_at } => {
                for m in moves {
                    next.modify_object(&m.id, |obj| {
                        obj.set_position(m.to);
                        obj.base.updated_at = *updated_at;
                    });
                }
            }
        }
        next
    }

    /// Revert the command.
    pub fn inverse(&self, board: &Board) -> Board {
        let mut next = board.clone();
        match &self.edit {
            Edit::AddObject { object, stamp } => {
                next.take_object(object.id());
                next.meta.updated_at = stamp.before;
            }
            Edit::RemoveObject {
                object,
                index,
                stamp,
            } => {
                next.insert_object(Arc::clone(object), Some(*index));
                next.meta.updated_at = stamp.before;
            }
            Edit::UpdateObject { before, stamp, .. } => {
                next.replace_object(Arc::clone(before));
                next.meta.updated_at = stamp.before;
            }
            Edit::SetCamera { before, .. } => next.camera = *before,
            Edit::SetSettings { before, stamp, .. } => {
                next.settings = before.clone();
                next.meta.updated_at = stamp.before;
            }
            Edit::MoveObjects { moves, .. } => {
                for m in moves {
                    next.modify_object(&m.id, |obj| {
                        obj.set_position(m.from);
                        obj.base.updated_at = m.updated_before;
                    });
                }
            }
        }
        next
    }
}
