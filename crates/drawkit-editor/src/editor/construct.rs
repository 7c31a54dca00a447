//! Building a new path with the pen tool.
//!
//! The draft lives outside the scene until it is finished, so construction
//! steps are not undoable edits; `undo_construction_step` drops the last one.

use tracing::debug;

use drawkit_core::{ModeError, Result};

use super::scene_ops::deselect_others;
use super::Editor;
use crate::bbox::BBox;
use crate::commands::EditCommand;
use crate::model::{CloseMode, Point};
use crate::scene::{ContainerPath, Drawable, Graphic};
use crate::tools::{Interaction, PathDraft, Tool};

impl Editor {
    fn draft_mut(&mut self) -> Result<&mut PathDraft> {
        match &mut self.interaction {
            Interaction::Constructing(draft) => Ok(draft),
            _ => Err(ModeError::NotActive {
                expected: "path construction",
            }
            .into()),
        }
    }

    /// Applies `step` to the draft and marks the new step, handles included,
    /// dirty.
    fn draft_step(&mut self, step: impl FnOnce(&mut PathDraft)) -> Result<()> {
        let draft = self.draft_mut()?;
        step(draft);
        let bounds = draft.last_step_bounds();
        self.dirty.register(&bounds);
        Ok(())
    }

    pub fn draft(&self) -> Option<&PathDraft> {
        match &self.interaction {
            Interaction::Constructing(draft) => Some(draft),
            _ => None,
        }
    }

    /// Starts a new path at `start`. Needs the pen tool.
    pub fn begin_path(&mut self, start: Point) -> Result<()> {
        self.require_idle()?;
        self.require_tool(Tool::Pen)?;
        debug!("Starting path construction at ({}, {})", start.x, start.y);
        self.interaction = Interaction::Constructing(PathDraft::new(start));
        Ok(())
    }

    pub fn add_line(&mut self, to: Point) -> Result<()> {
        self.draft_step(|d| d.line_to(to))
    }

    pub fn add_curve(&mut self, c1: Point, c2: Point, to: Point) -> Result<()> {
        self.draft_step(|d| d.curve_to(c1, c2, to))
    }

    /// Starts another subpath of the draft.
    pub fn add_move(&mut self, to: Point) -> Result<()> {
        self.draft_step(|d| d.move_to(to))
    }

    pub fn undo_construction_step(&mut self) -> Result<bool> {
        let draft = self.draft_mut()?;
        let bounds = draft.last_step_bounds();
        let removed = draft.pop().is_some();
        if removed {
            self.dirty.register(&bounds);
        }
        Ok(removed)
    }

    /// Inserts the draft as a new selected path, closed with `close` if given.
    pub fn finish_path(&mut self, close: Option<CloseMode>) -> Result<usize> {
        let draft = self.draft_mut()?.clone();
        let shape = draft.to_shape(self.defaults.style.clone(), close)?;
        self.interaction = Interaction::Idle;
        let index = self.scene.len();
        let object = Drawable::new(Graphic::Path(shape)).selected(true);
        let result = self.transaction("Add path", |ctx, builder| {
            deselect_others(ctx, builder, None)?;
            builder.push(EditCommand::insert(ctx, ContainerPath::root(), index, object)?);
            Ok(())
        });
        if result.is_err() {
            self.interaction = Interaction::Constructing(draft);
        }
        result.map(|_| index)
    }

    pub fn abandon_path(&mut self) -> Result<()> {
        let draft = self.draft_mut()?;
        let bounds = BBox::from_points(
            draft
                .segments()
                .iter()
                .flat_map(|s| s.controls())
                .map(|c| c.pos),
        );
        debug!("Abandoning path construction");
        self.dirty.register(&bounds);
        self.interaction = Interaction::Idle;
        Ok(())
    }
}
