//! Notifications from the editor to the document/UI collaborator.

use chrono::{DateTime, Utc};

use drawkit_core::Shared;

/// A completed command or transaction as seen by the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedEdit {
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Receives completed edits and history state changes.
pub trait EditSink {
    fn edit_posted(&mut self, edit: &PostedEdit);

    fn history_changed(&mut self, _can_undo: bool, _can_redo: bool) {}

    fn modified_changed(&mut self, _modified: bool) {}
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EditSink for NullSink {
    fn edit_posted(&mut self, _edit: &PostedEdit) {}
}

/// Keeps every notification for later inspection.
#[derive(Debug, Clone, Default)]
pub struct EditLog {
    pub posted: Vec<PostedEdit>,
    pub history: Option<(bool, bool)>,
    pub modified: Option<bool>,
}

impl EditSink for EditLog {
    fn edit_posted(&mut self, edit: &PostedEdit) {
        self.posted.push(edit.clone());
    }

    fn history_changed(&mut self, can_undo: bool, can_redo: bool) {
        self.history = Some((can_undo, can_redo));
    }

    fn modified_changed(&mut self, modified: bool) {
        self.modified = Some(modified);
    }
}

/// Lets the caller keep a handle on a sink owned by the editor.
impl<S: EditSink> EditSink for Shared<S> {
    fn edit_posted(&mut self, edit: &PostedEdit) {
        self.borrow_mut().edit_posted(edit);
    }

    fn history_changed(&mut self, can_undo: bool, can_redo: bool) {
        self.borrow_mut().history_changed(can_undo, can_redo);
    }

    fn modified_changed(&mut self, modified: bool) {
        self.borrow_mut().modified_changed(modified);
    }
}
