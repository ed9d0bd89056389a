//! Linear undo/redo over board snapshots.

use crate::board::Board;
use crate::command::Command;
use std::collections::VecDeque;

/// Undo/redo stacks around the current board.
///
/// `past` holds applied commands, oldest first. `future` holds undone
/// commands, most recently undone first. Executing a new command discards the
/// future.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<Command>,
    present: Board,
    future: VecDeque<Command>,
    /// Maximum number of undo entries kept, if any.
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Board::new())
    }
}

impl History {
    pub fn new(initial: Board) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
            limit: None,
        }
    }

    /// Keep at most `limit` undo entries, dropping the oldest.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.enforce_limit();
        self
    }

    /// The current board.
    pub fn present(&self) -> &Board {
        &self.present
    }

    pub fn past(&self) -> &[Command] {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<Command> {
        &self.future
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Apply a command and record it.
    pub fn execute(&mut self, cmd: Command) {
        log::debug!("execute {} ({})", cmd.name, cmd.id);
        self.present = cmd.forward(&self.present);
        self.past.push(cmd);
        self.future.clear();
        self.enforce_limit();
    }

    /// Undo the last command.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(cmd) = self.past.pop() else {
            return false;
        };
        log::debug!("undo {} ({})", cmd.name, cmd.id);
        self.present = cmd.inverse(&self.present);
        self.future.push_front(cmd);
        true
    }

    /// Redo the last undone command.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(cmd) = self.future.pop_front() else {
            return false;
        };
        log::debug!("redo {} ({})", cmd.name, cmd.id);
        self.present = cmd.forward(&self.present);
        self.past.push(cmd);
        self.enforce_limit();
        true
    }

    /// Replace the board and forget all history. Not undoable.
    pub fn reset(&mut self, board: Board) {
        log::info!("history reset to board {}", board.meta.id);
        self.present = board;
        self.past.clear();
        self.future.clear();
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            let excess = self.past.len().saturating_sub(limit);
            self.past.drain(..excess);
        }
    }
}
