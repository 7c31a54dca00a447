//! Linear undo/redo history.

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use drawkit_core::constants::DEFAULT_HISTORY_LIMIT;
use drawkit_core::{ModeError, Result};

use crate::commands::{EditCommand, EditContext};

/// A recorded command with the time it was posted.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub command: EditCommand,
    pub recorded_at: DateTime<Utc>,
}

/// Undo and redo stacks with a saved-position marker.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    limit: usize,
    /// Undo depth at which the document was last saved; `None` once that state
    /// can no longer be reached.
    saved_depth: Option<usize>,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
            saved_depth: Some(0),
        }
    }

    /// Records an already applied command and drops the redo branch.
    pub fn record(&mut self, command: EditCommand) -> &HistoryEntry {
        debug!("Posted '{}'", command.description());
        if self
            .saved_depth
            .is_some_and(|depth| depth > self.undo_stack.len())
        {
            self.saved_depth = None;
        }
        self.redo_stack.clear();
        self.undo_stack.push(HistoryEntry {
            command,
            recorded_at: Utc::now(),
        });
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
            self.saved_depth = self.saved_depth.and_then(|d| d.checked_sub(1));
        }
        let last = self.undo_stack.len() - 1;
        &self.undo_stack[last]
    }

    /// Reverts the newest command and returns its description.
    ///
    /// A command that no longer matches the scene clears the whole history.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<String> {
        let entry = self
            .undo_stack
            .pop()
            .ok_or(ModeError::HistoryEmpty { action: "undo" })?;
        if let Err(e) = entry.command.undo(ctx) {
            error!("Undo of '{}' failed: {}", entry.command.description(), e);
            self.clear();
            return Err(e);
        }
        let description = entry.command.description();
        self.redo_stack.push(entry);
        Ok(description)
    }

    /// Re-applies the newest undone command and returns its description.
    pub fn redo(&mut self, ctx: &mut EditContext<'_>) -> Result<String> {
        let entry = self
            .redo_stack
            .pop()
            .ok_or(ModeError::HistoryEmpty { action: "redo" })?;
        if let Err(e) = entry.command.redo(ctx) {
            error!("Redo of '{}' failed: {}", entry.command.description(), e);
            self.clear();
            return Err(e);
        }
        let description = entry.command.description();
        self.undo_stack.push(entry);
        Ok(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Applies a new depth limit, dropping the oldest entries.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        let excess = self.undo_stack.len().saturating_sub(self.limit);
        if excess > 0 {
            self.undo_stack.drain(..excess);
            self.saved_depth = self.saved_depth.and_then(|d| d.checked_sub(excess));
        }
    }

    /// Whether the scene differs from the last saved state.
    pub fn is_modified(&self) -> bool {
        self.saved_depth != Some(self.undo_stack.len())
    }

    pub fn mark_saved(&mut self) {
        self.saved_depth = Some(self.undo_stack.len());
    }

    /// Drops both stacks. The current state counts as modified afterwards
    /// unless it was the saved one.
    pub fn clear(&mut self) {
        let was_saved = !self.is_modified();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.saved_depth = was_saved.then_some(0);
    }

    /// Undo descriptions, newest first.
    pub fn descriptions(&self) -> Vec<String> {
        self.undo_stack
            .iter()
            .rev()
            .map(|e| e.command.description())
            .collect()
    }

    /// Redo descriptions, next first.
    pub fn redo_descriptions(&self) -> Vec<String> {
        self.redo_stack
            .iter()
            .rev()
            .map(|e| e.command.description())
            .collect()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.undo_stack.last()
    }
}
