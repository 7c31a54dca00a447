//! Transactions: several commands recorded and reverted as one history entry.

use drawkit_core::{EmptyResultError, Error, Result};

use super::{EditCommand, EditContext};
use crate::dirty::Repaint;

/// A frozen transaction of several commands.
#[derive(Debug, Clone)]
pub struct CompoundEdit {
    label: String,
    children: Vec<EditCommand>,
}

impl CompoundEdit {
    /// Starts collecting the commands of one transaction.
    pub fn begin(label: impl Into<String>) -> CompoundBuilder {
        CompoundBuilder {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Description shown in the undo/redo menu.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in the order they were applied.
    pub fn children(&self) -> &[EditCommand] {
        &self.children
    }

    /// Re-applies every child in order.
    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        for child in &self.children {
            child.redo(ctx)?;
        }
        Ok(())
    }

    /// Reverts every child, newest first.
    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        for child in self.children.iter().rev() {
            child.undo(ctx)?;
        }
        Ok(())
    }

    /// Union of the children's repaint regions.
    pub fn repaint(&self) -> Repaint {
        self.children
            .iter()
            .fold(Repaint::Nothing, |acc, c| acc.union(c.repaint()))
    }
}

/// An open transaction. Every pushed command is already applied.
#[derive(Debug)]
pub struct CompoundBuilder {
    label: String,
    children: Vec<EditCommand>,
}

impl CompoundBuilder {
    /// Records a command that has already been applied.
    pub fn push(&mut self, command: EditCommand) {
        self.children.push(command);
    }

    /// Pushes a constructed command. A command refused because it would not
    /// change anything is skipped.
    pub fn push_or_skip(&mut self, result: Result<EditCommand>) -> Result<()> {
        match result {
            Ok(command) => {
                self.push(command);
                Ok(())
            }
            Err(Error::EmptyResult(EmptyResultError::NoChange)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// True while nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Reverts every applied child, newest first.
    pub fn rollback(self, ctx: &mut EditContext<'_>) -> Result<()> {
        tracing::debug!(
            "Rolling back {} command(s) of '{}'",
            self.children.len(),
            self.label
        );
        for child in self.children.iter().rev() {
            child.undo(ctx)?;
        }
        Ok(())
    }

    /// Freezes the transaction. A single child is returned unwrapped.
    pub fn end(mut self) -> Option<EditCommand> {
        match self.children.len() {
            0 => None,
            1 => self.children.pop(),
            _ => Some(EditCommand::Compound(CompoundEdit {
                label: self.label,
                children: self.children,
            })),
        }
    }
}
