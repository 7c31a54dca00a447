//! Commands that change which objects a container holds or their order.

use drawkit_core::{EmptyResultError, InvariantError, ObjectId, Result};

use super::EditContext;
use crate::scene::{ContainerPath, Drawable, Graphic, Group, ObjectRef};

#[derive(Debug, Clone)]
pub struct InsertObject {
    pub container: ContainerPath,
    pub index: usize,
    pub object: Drawable,
}

impl InsertObject {
    pub fn new(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        index: usize,
        object: Drawable,
    ) -> Result<Self> {
        let cmd = Self {
            container,
            index,
            object,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        ctx.scene
            .insert(&self.container, self.index, self.object.clone())?;
        ctx.dirty.force_full();
        Ok(())
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        ctx.scene
            .remove(&self.container, self.index, self.object.id)?;
        ctx.dirty.force_full();
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RemoveObject {
    pub container: ContainerPath,
    pub index: usize,
    pub object: Drawable,
}

impl RemoveObject {
    pub fn new(ctx: &mut EditContext<'_>, at: ObjectRef) -> Result<Self> {
        let object = ctx.scene.get(&at)?.clone();
        let cmd = Self {
            container: at.container,
            index: at.index,
            object,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        ctx.scene
            .remove(&self.container, self.index, self.object.id)?;
        ctx.dirty.force_full();
        Ok(())
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        ctx.scene
            .insert(&self.container, self.index, self.object.clone())?;
        ctx.dirty.force_full();
        Ok(())
    }
}

/// Swaps one object for another in place, identity included.
#[derive(Debug, Clone)]
pub struct SubstituteObject {
    pub at: ObjectRef,
    pub before: Drawable,
    pub after: Drawable,
    pub label: &'static str,
}

impl SubstituteObject {
    pub fn new(
        ctx: &mut EditContext<'_>,
        at: ObjectRef,
        after: Drawable,
        label: &'static str,
    ) -> Result<Self> {
        let before = ctx.scene.get(&at)?.clone();
        if before == after {
            return Err(EmptyResultError::NoChange.into());
        }
        let cmd = Self {
            at,
            before,
            after,
            label,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        swap(ctx, &self.at, &self.before, &self.after)
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        swap(ctx, &self.at, &self.after, &self.before)
    }
}

fn swap(ctx: &mut EditContext<'_>, at: &ObjectRef, from: &Drawable, to: &Drawable) -> Result<()> {
    let slot = ctx.scene.expect_mut(at, from.id)?;
    *slot = to.clone();
    ctx.dirty.register_change(&from.bounds(), &to.bounds());
    Ok(())
}

/// Moves one object to another position within its container.
#[derive(Debug, Clone)]
pub struct ReorderObject {
    pub container: ContainerPath,
    pub from: usize,
    pub to: usize,
    pub id: ObjectId,
}

impl ReorderObject {
    pub fn new(
        ctx: &mut EditContext<'_>,
        container: ContainerPath,
        from: usize,
        to: usize,
    ) -> Result<Self> {
        let len = ctx.scene.container(&container)?.objects.len();
        if to >= len {
            return Err(InvariantError::IndexOutOfRange { index: to, len }.into());
        }
        if from == to {
            return Err(EmptyResultError::NoChange.into());
        }
        let id = ctx.scene.get(&ObjectRef::new(container.clone(), from))?.id;
        let cmd = Self {
            container,
            from,
            to,
            id,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    fn shift(&self, ctx: &mut EditContext<'_>, from: usize, to: usize) -> Result<()> {
        let object = ctx.scene.remove(&self.container, from, self.id)?;
        ctx.scene.insert(&self.container, to, object)?;
        ctx.dirty.force_full();
        Ok(())
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.shift(ctx, self.from, self.to)
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.shift(ctx, self.to, self.from)
    }
}

/// Wraps several objects of one container into a new group.
///
/// Members are removed highest index first and the group is inserted at the
/// lowest member index, so it takes the z-position of the bottom member.
#[derive(Debug, Clone)]
pub struct GroupObjects {
    pub container: ContainerPath,
    /// Ascending member indices before grouping.
    pub indices: Vec<usize>,
    pub member_ids: Vec<ObjectId>,
    pub group_id: ObjectId,
}

impl GroupObjects {
    pub fn new(ctx: &mut EditContext<'_>, container: ContainerPath, indices: &[usize]) -> Result<Self> {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            return Err(EmptyResultError::NothingSelected.into());
        }
        let member_ids = indices
            .iter()
            .map(|&i| {
                ctx.scene
                    .get(&ObjectRef::new(container.clone(), i))
                    .map(|o| o.id)
            })
            .collect::<Result<Vec<_>>>()?;
        let cmd = Self {
            container,
            indices,
            member_ids,
            group_id: uuid::Uuid::new_v4(),
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        let mut members = Vec::with_capacity(self.indices.len());
        for (&index, &id) in self.indices.iter().zip(&self.member_ids).rev() {
            members.push(ctx.scene.remove(&self.container, index, id)?);
        }
        members.reverse();
        let group = Drawable {
            id: self.group_id,
            selected: true,
            graphic: Graphic::Group(Group { objects: members }),
        };
        ctx.scene.insert(&self.container, self.indices[0], group)?;
        ctx.dirty.force_full();
        Ok(())
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        let group = ctx
            .scene
            .remove(&self.container, self.indices[0], self.group_id)?;
        let Graphic::Group(Group { objects }) = group.graphic else {
            return Err(InvariantError::WrongKind {
                id: self.group_id,
                expected: "group",
            }
            .into());
        };
        for (&index, object) in self.indices.iter().zip(objects) {
            ctx.scene.insert(&self.container, index, object)?;
        }
        ctx.dirty.force_full();
        Ok(())
    }
}

/// Replaces a group by its members at the group's position.
#[derive(Debug, Clone)]
pub struct UngroupObject {
    pub container: ContainerPath,
    pub index: usize,
    /// The group without its members.
    pub shell: Drawable,
    pub member_ids: Vec<ObjectId>,
}

impl UngroupObject {
    pub fn new(ctx: &mut EditContext<'_>, at: ObjectRef) -> Result<Self> {
        let object = ctx.scene.get(&at)?;
        let Some(group) = object.as_group() else {
            return Err(InvariantError::WrongKind {
                id: object.id,
                expected: "group",
            }
            .into());
        };
        let member_ids = group.objects.iter().map(|o| o.id).collect();
        let shell = Drawable {
            id: object.id,
            selected: object.selected,
            graphic: Graphic::Group(Group::default()),
        };
        let cmd = Self {
            container: at.container,
            index: at.index,
            shell,
            member_ids,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        let group = ctx
            .scene
            .remove(&self.container, self.index, self.shell.id)?;
        let Graphic::Group(Group { objects }) = group.graphic else {
            return Err(InvariantError::WrongKind {
                id: self.shell.id,
                expected: "group",
            }
            .into());
        };
        for (offset, object) in objects.into_iter().enumerate() {
            ctx.scene
                .insert(&self.container, self.index + offset, object)?;
        }
        ctx.dirty.force_full();
        Ok(())
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        let mut members = Vec::with_capacity(self.member_ids.len());
        for (offset, &id) in self.member_ids.iter().enumerate().rev() {
            members.push(ctx.scene.remove(&self.container, self.index + offset, id)?);
        }
        members.reverse();
        let mut group = self.shell.clone();
        group.graphic = Graphic::Group(Group { objects: members });
        ctx.scene.insert(&self.container, self.index, group)?;
        ctx.dirty.force_full();
        Ok(())
    }
}
