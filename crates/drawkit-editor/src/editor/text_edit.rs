//! Live editing of one text. Keystrokes go to a buffer; the text object only
//! changes when the edit is finished.

use tracing::debug;

use drawkit_core::{EmptyResultError, ModeError, Result, TopologyError};

use super::Editor;
use crate::commands::EditCommand;
use crate::scene::{Graphic, ObjectRef};
use crate::tools::{Interaction, TextEditState};

impl Editor {
    fn text_state_mut(&mut self) -> Result<&mut TextEditState> {
        match &mut self.interaction {
            Interaction::TextEdit(state) => Ok(state),
            _ => Err(ModeError::NotActive {
                expected: "text edit",
            }
            .into()),
        }
    }

    /// Applies `f` to the buffer and repaints the edited text.
    fn text_step<T>(&mut self, f: impl FnOnce(&mut TextEditState) -> T) -> Result<T> {
        let state = self.text_state_mut()?;
        let out = f(&mut *state);
        let (target, id) = (state.target.clone(), state.id);
        if let Ok(object) = self.scene.expect(&target, id) {
            self.dirty.register(&object.bounds());
        }
        Ok(out)
    }

    /// Starts editing the single selected text, cursor at the end.
    pub fn begin_text_edit(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.scene.selected_indices();
        let &[index] = indices.as_slice() else {
            return Err(EmptyResultError::NothingSelected.into());
        };
        let object = &self.scene.objects()[index];
        let Graphic::Text(text) = &object.graphic else {
            return Err(TopologyError::Unsupported {
                operation: "edit the text of",
                kind: object.graphic.kind_name(),
            }
            .into());
        };
        debug!("Editing text {}", object.id);
        let state = TextEditState::new(ObjectRef::root(index), object.id, &text.content);
        self.interaction = Interaction::TextEdit(state);
        Ok(())
    }

    pub fn text_edit_buffer(&self) -> Option<&TextEditState> {
        match &self.interaction {
            Interaction::TextEdit(state) => Some(state),
            _ => None,
        }
    }

    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        self.text_step(|s| s.insert(text))
    }

    pub fn backspace(&mut self) -> Result<bool> {
        self.text_step(TextEditState::backspace)
    }

    pub fn delete_forward(&mut self) -> Result<bool> {
        self.text_step(TextEditState::delete)
    }

    pub fn cursor_left(&mut self) -> Result<()> {
        self.text_step(TextEditState::move_left)
    }

    pub fn cursor_right(&mut self) -> Result<()> {
        self.text_step(TextEditState::move_right)
    }

    pub fn cursor_home(&mut self) -> Result<()> {
        self.text_step(TextEditState::home)
    }

    pub fn cursor_end(&mut self) -> Result<()> {
        self.text_step(TextEditState::end)
    }

    /// Commits the buffer as one "Edit text" command. An unchanged buffer
    /// just ends the edit.
    pub fn finish_text_edit(&mut self) -> Result<()> {
        let state = self.text_state_mut()?.clone();
        let unchanged = match &self.scene.expect(&state.target, state.id)?.graphic {
            Graphic::Text(text) => text.content == state.buffer,
            _ => false,
        };
        if !unchanged {
            self.transaction("Edit text", |ctx, builder| {
                builder.push(EditCommand::retext(ctx, state.target.clone(), state.buffer.clone())?);
                Ok(())
            })?;
        }
        debug!("Finished text edit of {}", state.id);
        self.interaction = Interaction::Idle;
        Ok(())
    }

    /// Drops the buffer, leaving the text as it was.
    pub fn abandon_text_edit(&mut self) -> Result<()> {
        let state = self.text_state_mut()?;
        let (target, id) = (state.target.clone(), state.id);
        debug!("Abandoning text edit of {}", id);
        if let Ok(object) = self.scene.expect(&target, id) {
            self.dirty.register(&object.bounds());
        }
        self.interaction = Interaction::Idle;
        Ok(())
    }
}
