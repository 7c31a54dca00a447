//! Reversible edit commands.
//!
//! Constructing a command performs the edit and captures what is needed to
//! reverse it, so a command never exists half-applied. `undo`/`redo` restore the
//! captured snapshots; they never re-run the forward logic.

use drawkit_core::{ObjectId, Result};

use crate::bbox::BBox;
use crate::dirty::{DirtyTracker, Repaint};
use crate::model::{Font, PathShape, Point, Style, StyleDefaults, TextMeasure, TextShape};
use crate::scene::{ContainerPath, Drawable, Graphic, ObjectRef, SceneGraph};

mod compound;
mod edits;
mod objects;

pub use compound::{CompoundBuilder, CompoundEdit};
pub use edits::{RefontText, ReshapeObject, RestyleObject, RetextText, SelectObject};
pub use objects::{
    GroupObjects, InsertObject, RemoveObject, ReorderObject, SubstituteObject, UngroupObject,
};

/// Everything a command touches while applying or reverting.
pub struct EditContext<'a> {
    pub scene: &'a mut SceneGraph,
    pub dirty: &'a mut DirtyTracker,
    pub defaults: &'a StyleDefaults,
    pub measure: &'a dyn TextMeasure,
}

/// One atomic, reversible edit.
#[derive(Debug, Clone)]
pub enum EditCommand {
    Insert(InsertObject),
    Remove(RemoveObject),
    Substitute(SubstituteObject),
    Reshape(ReshapeObject),
    Restyle(RestyleObject),
    Refont(RefontText),
    Retext(RetextText),
    Select(SelectObject),
    Reorder(ReorderObject),
    Group(GroupObjects),
    Ungroup(UngroupObject),
    Compound(CompoundEdit),
}

impl EditCommand {
    pub fn insert(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        index: usize,
        object: Drawable,
    ) -> Result<Self> {
        InsertObject::new(ctx, container, index, object).map(EditCommand::Insert)
    }

    /// Inserts a rectangle styled with the context defaults.
    pub fn create_rectangle(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        index: usize,
        bbox: BBox,
    ) -> Result<Self> {
        let rect = PathShape::rectangle(bbox, ctx.defaults.style.clone());
        let object = Drawable::new(Graphic::Path(rect)).selected(true);
        Self::insert(ctx, container, index, object)
    }

    /// Inserts a text styled and measured with the context defaults.
    pub fn create_text(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        index: usize,
        anchor: Point,
        content: &str,
    ) -> Result<Self> {
        let text = TextShape::new(
            anchor,
            content,
            ctx.defaults.font.clone(),
            ctx.defaults.style.clone(),
            ctx.measure,
        );
        let object = Drawable::new(Graphic::Text(text)).selected(true);
        Self::insert(ctx, container, index, object)
    }

    pub fn remove(ctx: &mut EditContext<'_>, at: ObjectRef) -> Result<Self> {
        RemoveObject::new(ctx, at).map(EditCommand::Remove)
    }

    /// Replaces the object at `at` with `after`, identity included.
    pub fn substitute(
        ctx: &mut EditContext<'_>,
        at: ObjectRef,
        after: Drawable,
        label: &'static str,
    ) -> Result<Self> {
        SubstituteObject::new(ctx, at, after, label).map(EditCommand::Substitute)
    }

    pub fn reshape(
        ctx: &mut EditContext<'_>,
        at: ObjectRef,
        after: Graphic,
        label: &'static str,
    ) -> Result<Self> {
        ReshapeObject::new(ctx, at, after, label).map(EditCommand::Reshape)
    }

    pub fn restyle(ctx: &mut EditContext<'_>, at: ObjectRef, style: Style) -> Result<Self> {
        RestyleObject::new(ctx, at, style).map(EditCommand::Restyle)
    }

    pub fn refont(ctx: &mut EditContext<'_>, at: ObjectRef, font: Font) -> Result<Self> {
        RefontText::new(ctx, at, font).map(EditCommand::Refont)
    }

    pub fn retext(ctx: &mut EditContext<'_>, at: ObjectRef, content: String) -> Result<Self> {
        RetextText::new(ctx, at, content).map(EditCommand::Retext)
    }

    pub fn select(ctx: &mut EditContext<'_>, at: ObjectRef, selected: bool) -> Result<Self> {
        SelectObject::new(ctx, at, selected).map(EditCommand::Select)
    }

    pub fn reorder(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        from: usize,
        to: usize,
    ) -> Result<Self> {
        ReorderObject::new(ctx, container, from, to).map(EditCommand::Reorder)
    }

    pub fn group(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        indices: &[usize],
    ) -> Result<Self> {
        GroupObjects::new(ctx, container, indices).map(EditCommand::Group)
    }

    pub fn ungroup(ctx: &mut EditContext<'_>, at: ObjectRef) -> Result<Self> {
        UngroupObject::new(ctx, at).map(EditCommand::Ungroup)
    }

    /// Restores the exact pre-edit state.
    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        match self {
            EditCommand::Insert(cmd) => cmd.undo(ctx),
            EditCommand::Remove(cmd) => cmd.undo(ctx),
            EditCommand::Substitute(cmd) => cmd.undo(ctx),
            EditCommand::Reshape(cmd) => cmd.undo(ctx),
            EditCommand::Restyle(cmd) => cmd.undo(ctx),
            EditCommand::Refont(cmd) => cmd.undo(ctx),
            EditCommand::Retext(cmd) => cmd.undo(ctx),
            EditCommand::Select(cmd) => cmd.undo(ctx),
            EditCommand::Reorder(cmd) => cmd.undo(ctx),
            EditCommand::Group(cmd) => cmd.undo(ctx),
            EditCommand::Ungroup(cmd) => cmd.undo(ctx),
            EditCommand::Compound(cmd) => cmd.undo(ctx),
        }
    }

    /// Reproduces the exact post-edit state.
    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        match self {
            EditCommand::Insert(cmd) => cmd.redo(ctx),
            EditCommand::Remove(cmd) => cmd.redo(ctx),
            EditCommand::Substitute(cmd) => cmd.redo(ctx),
            EditCommand::Reshape(cmd) => cmd.redo(ctx),
            EditCommand::Restyle(cmd) => cmd.redo(ctx),
            EditCommand::Refont(cmd) => cmd.redo(ctx),
            EditCommand::Retext(cmd) => cmd.redo(ctx),
            EditCommand::Select(cmd) => cmd.redo(ctx),
            EditCommand::Reorder(cmd) => cmd.redo(ctx),
            EditCommand::Group(cmd) => cmd.redo(ctx),
            EditCommand::Ungroup(cmd) => cmd.redo(ctx),
            EditCommand::Compound(cmd) => cmd.redo(ctx),
        }
    }

    /// Human-readable label for history display.
    pub fn description(&self) -> String {
        match self {
            EditCommand::Insert(cmd) => format!("Add {}", cmd.object.graphic.kind_name()),
            EditCommand::Remove(cmd) => format!("Delete {}", cmd.object.graphic.kind_name()),
            EditCommand::Substitute(cmd) => cmd.label.to_string(),
            EditCommand::Reshape(cmd) => cmd.label.to_string(),
            EditCommand::Restyle(_) => "Change style".to_string(),
            EditCommand::Refont(_) => "Change font".to_string(),
            EditCommand::Retext(_) => "Edit text".to_string(),
            EditCommand::Select(cmd) if cmd.selected => "Select".to_string(),
            EditCommand::Select(_) => "Deselect".to_string(),
            EditCommand::Reorder(_) => "Change order".to_string(),
            EditCommand::Group(_) => "Group".to_string(),
            EditCommand::Ungroup(_) => "Ungroup".to_string(),
            EditCommand::Compound(cmd) => cmd.label().to_string(),
        }
    }

    /// Region this command repaints when applied or reverted.
    pub fn repaint(&self) -> Repaint {
        match self {
            EditCommand::Insert(_)
            | EditCommand::Remove(_)
            | EditCommand::Reorder(_)
            | EditCommand::Group(_)
            | EditCommand::Ungroup(_) => Repaint::Full,
            EditCommand::Substitute(cmd) => {
                Repaint::region(cmd.before.bounds().union(&cmd.after.bounds()))
            }
            EditCommand::Reshape(cmd) => Repaint::region(cmd.dirty_box()),
            EditCommand::Restyle(cmd) => Repaint::region(cmd.dirty_box()),
            EditCommand::Refont(cmd) => Repaint::region(cmd.dirty_box()),
            EditCommand::Retext(cmd) => Repaint::region(cmd.dirty_box()),
            EditCommand::Select(cmd) => Repaint::region(cmd.bounds),
            EditCommand::Compound(cmd) => cmd.repaint(),
        }
    }

    /// Identities of the objects this command touches directly.
    pub fn touched(&self) -> Vec<ObjectId> {
        match self {
            EditCommand::Insert(cmd) => vec![cmd.object.id],
            EditCommand::Remove(cmd) => vec![cmd.object.id],
            EditCommand::Substitute(cmd) => vec![cmd.before.id, cmd.after.id],
            EditCommand::Reshape(cmd) => vec![cmd.id],
            EditCommand::Restyle(cmd) => vec![cmd.id],
            EditCommand::Refont(cmd) => vec![cmd.id],
            EditCommand::Retext(cmd) => vec![cmd.id],
            EditCommand::Select(cmd) => vec![cmd.id],
            EditCommand::Reorder(cmd) => vec![cmd.id],
            EditCommand::Group(cmd) => vec![cmd.group_id],
            EditCommand::Ungroup(cmd) => vec![cmd.shell.id],
            EditCommand::Compound(cmd) => cmd.children().iter().flat_map(EditCommand::touched).collect(),
        }
    }
}

/// Applies `f` to the object at `at` after an identity check and registers the
/// union of its bounds before and after.
pub(crate) fn modify(
    ctx: &mut EditContext<'_>,
    at: &ObjectRef,
    id: ObjectId,
    f: impl FnOnce(&mut Drawable) -> Result<()>,
) -> Result<()> {
    let object = ctx.scene.expect_mut(at, id)?;
    let before = object.bounds();
    f(object)?;
    let after = object.bounds();
    ctx.dirty.register_change(&before, &after);
    Ok(())
}
