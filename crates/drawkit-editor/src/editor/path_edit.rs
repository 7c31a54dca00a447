//! Point-level editing of the one path in path-edit mode.

use tracing::debug;

use drawkit_core::{EmptyResultError, ModeError, Result, TopologyError};

use super::Editor;
use crate::commands::EditCommand;
use crate::model::{CloseMode, ControlPoint, Conversion, Point};
use crate::scene::{AnchorSlot, Drawable, Graphic, ObjectRef};
use crate::tools::{Interaction, PathEditState, Tool};

impl Editor {
    fn path_edit_state(&self) -> Result<PathEditState> {
        match &self.interaction {
            Interaction::PathEdit(state) => Ok(state.clone()),
            _ => Err(ModeError::NotActive {
                expected: "path edit",
            }
            .into()),
        }
    }

    fn edited_graphic(&self, state: &PathEditState) -> Result<&Graphic> {
        Ok(&self.scene.expect(&state.target, state.id)?.graphic)
    }

    fn set_selected_control(&mut self, control: usize) {
        if let Interaction::PathEdit(state) = &mut self.interaction {
            state.selected = control;
        }
    }

    /// Enters path-edit mode on the single selected path or symmetric path.
    pub fn begin_path_edit(&mut self) -> Result<()> {
        self.require_idle()?;
        self.require_tool(Tool::Select)?;
        let indices = self.scene.selected_indices();
        let &[index] = indices.as_slice() else {
            return Err(EmptyResultError::NothingSelected.into());
        };
        let object = &self.scene.objects()[index];
        if !object.graphic.is_editable_path() {
            return Err(TopologyError::NotAPath {
                kind: object.graphic.kind_name(),
            }
            .into());
        }
        debug!("Entering path edit of {}", object.id);
        self.interaction = Interaction::PathEdit(PathEditState {
            target: ObjectRef::root(index),
            id: object.id,
            selected: 0,
        });
        self.dirty.register(&object.bounds());
        Ok(())
    }

    /// Leaves path-edit mode. Every edit is already in the history.
    pub fn finish_path_edit(&mut self) -> Result<()> {
        let state = self.path_edit_state()?;
        debug!("Leaving path edit of {}", state.id);
        if let Ok(object) = self.scene.expect(&state.target, state.id) {
            self.dirty.register(&object.bounds());
        }
        self.interaction = Interaction::Idle;
        Ok(())
    }

    /// Same as [`finish_path_edit`](Self::finish_path_edit); edits made in the
    /// mode stay in the history and are undone one by one.
    pub fn abandon_path_edit(&mut self) -> Result<()> {
        self.finish_path_edit()
    }

    /// Index and value of the selected control, outside path edit `None`.
    pub fn selected_control(&self) -> Option<(usize, ControlPoint)> {
        let state = self.path_edit_state().ok()?;
        let control = self.edited_graphic(&state).ok()?.control(state.selected).ok()?;
        Some((state.selected, control))
    }

    /// Selects control `control` of the edited shape.
    ///
    /// Fails with a topology error if the index is past the last control.
    pub fn select_control(&mut self, control: usize) -> Result<()> {
        let state = self.path_edit_state()?;
        self.edited_graphic(&state)?.control(control)?;
        self.set_selected_control(control);
        Ok(())
    }

    /// Selects the control after the current one, wrapping to the first.
    pub fn next_control(&mut self) -> Result<usize> {
        let state = self.path_edit_state()?;
        let next = self.edited_graphic(&state)?.next_control(state.selected)?;
        self.set_selected_control(next);
        Ok(next)
    }

    /// Selects the control before the current one, wrapping to the last.
    pub fn previous_control(&mut self) -> Result<usize> {
        let state = self.path_edit_state()?;
        let previous = self.edited_graphic(&state)?.previous_control(state.selected)?;
        self.set_selected_control(previous);
        Ok(previous)
    }

    /// Runs a pure operation on the edited shape and commits its result.
    fn reshape_edited(
        &mut self,
        label: &'static str,
        op: impl FnOnce(&Graphic, usize) -> Result<Graphic>,
    ) -> Result<()> {
        let state = self.path_edit_state()?;
        let after = op(self.edited_graphic(&state)?, state.selected)?;
        let count = after.control_count()?;
        self.transaction(label, |ctx, builder| {
            builder.push(EditCommand::reshape(ctx, state.target.clone(), after, label)?);
            Ok(())
        })?;
        if count > 0 {
            self.set_selected_control(state.selected.min(count - 1));
        }
        Ok(())
    }

    /// Converts the segment owning the selected control.
    pub fn convert_segment(&mut self, conversion: Conversion) -> Result<()> {
        let label = match conversion {
            Conversion::ToLine => "Convert to line",
            Conversion::ToBezier => "Convert to curve",
            Conversion::ToMove => "Convert to move",
            Conversion::ToClosingMove => "Convert to closing move",
        };
        self.reshape_edited(label, |g, c| g.converted_at(c, conversion))
    }

    /// Moves the selected control; an anchored control becomes concrete.
    pub fn move_point(&mut self, to: Point) -> Result<()> {
        self.reshape_edited("Move point", |g, c| g.with_control_moved(c, to))
    }

    /// Turns the handle opposite to the selected one so the curve passes
    /// smoothly through their anchor.
    ///
    /// With `equi` the opposite handle also takes the selected handle's length;
    /// otherwise it keeps its own. Fails with `NoNeighborHandle` when the anchor
    /// has no opposite handle.
    pub fn make_continuous(&mut self, equi: bool) -> Result<()> {
        self.reshape_edited("Make continuous", |g, c| g.made_continuous(c, equi))
    }

    /// Opens the edited closed path.
    ///
    /// With `remove_last` the closing segment is dropped; otherwise it stays as
    /// an ordinary trailing segment.
    pub fn open_path(&mut self, remove_last: bool) -> Result<()> {
        self.reshape_edited("Open path", |g, _| g.opened(remove_last))
    }

    /// Closes the edited open path with a straight line, a smooth curve or by
    /// merging its ends, depending on `mode`.
    pub fn close_path(&mut self, mode: CloseMode) -> Result<()> {
        self.reshape_edited("Close path", |g, _| g.closed(mode))
    }

    /// Anchors or frees the join segment of a symmetric path.
    pub fn toggle_join_anchor(&mut self) -> Result<()> {
        self.reshape_edited("Toggle join", |g, _| g.toggled_anchor(AnchorSlot::Join))
    }

    /// Anchors or frees the closing segment of a symmetric path.
    pub fn toggle_closing_anchor(&mut self) -> Result<()> {
        self.reshape_edited("Toggle closing", |g, _| g.toggled_anchor(AnchorSlot::Closing))
    }

    /// Replaces the join slot of the edited symmetric path.
    pub fn set_symmetric_join(&mut self, join: Option<crate::model::Segment>) -> Result<()> {
        self.reshape_edited("Set join", |g, _| match g {
            Graphic::Symmetric(s) => Ok(Graphic::Symmetric(s.with_join(join)?)),
            other => Err(TopologyError::Unsupported {
                operation: "set the join of",
                kind: other.kind_name(),
            }
            .into()),
        })
    }

    /// Replaces the closing slot of the edited symmetric path.
    pub fn set_symmetric_closing(&mut self, closing: Option<crate::model::Segment>) -> Result<()> {
        self.reshape_edited("Set closing", |g, _| match g {
            Graphic::Symmetric(s) => Ok(Graphic::Symmetric(s.with_closing(closing)?)),
            other => Err(TopologyError::Unsupported {
                operation: "set the closing of",
                kind: other.kind_name(),
            }
            .into()),
        })
    }

    /// Subdivides the segment owning the selected control and selects the new
    /// anchor.
    pub fn add_point(&mut self) -> Result<usize> {
        let state = self.path_edit_state()?;
        let (after, anchor) = self.edited_graphic(&state)?.with_point_added(state.selected)?;
        self.transaction("Add point", |ctx, builder| {
            builder.push(EditCommand::reshape(ctx, state.target.clone(), after, "Add point")?);
            Ok(())
        })?;
        self.set_selected_control(anchor);
        Ok(anchor)
    }

    /// Deletes the selected control. Deleting the last point removes the shape
    /// and leaves path-edit mode.
    pub fn delete_point(&mut self) -> Result<()> {
        let state = self.path_edit_state()?;
        match self.edited_graphic(&state)?.with_point_deleted(state.selected)? {
            Some((after, selected)) => {
                self.transaction("Delete point", |ctx, builder| {
                    builder.push(EditCommand::reshape(ctx, state.target.clone(), after, "Delete point")?);
                    Ok(())
                })?;
                self.set_selected_control(selected);
            }
            None => {
                self.transaction("Delete point", |ctx, builder| {
                    builder.push(EditCommand::remove(ctx, state.target.clone())?);
                    Ok(())
                })?;
                debug!("Last point deleted, leaving path edit");
                self.interaction = Interaction::Idle;
            }
        }
        Ok(())
    }

    /// Breaks the edited path at the anchor owning the selected control. The
    /// tail becomes a new object just above the edited one.
    pub fn break_path(&mut self) -> Result<()> {
        let state = self.path_edit_state()?;
        let (head, tail) = self.edited_graphic(&state)?.broken_at(state.selected)?;
        let count = head.control_count()?;
        let tail_at = state.target.index + 1;
        self.transaction("Break path", |ctx, builder| {
            builder.push(EditCommand::reshape(ctx, state.target.clone(), head, "Break path")?);
            builder.push(EditCommand::insert(
                ctx,
                state.target.container.clone(),
                tail_at,
                Drawable::new(tail),
            )?);
            Ok(())
        })?;
        self.set_selected_control(state.selected.min(count.saturating_sub(1)));
        Ok(())
    }
}
