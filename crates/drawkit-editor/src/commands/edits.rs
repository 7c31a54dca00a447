//! Commands that change one object in place.

use drawkit_core::{EmptyResultError, InvariantError, ObjectId, Result};

use super::{modify, EditContext};
use crate::bbox::BBox;
use crate::model::{Font, Graphical, Style, TextExtent};
use crate::scene::{Drawable, Graphic, ObjectRef};

/// Replaces the geometry of an object, keeping its identity.
#[derive(Debug, Clone)]
pub struct ReshapeObject {
    pub at: ObjectRef,
    pub id: ObjectId,
    pub before: Graphic,
    pub after: Graphic,
    pub label: &'static str,
}

impl ReshapeObject {
    pub fn new(
        ctx: &mut EditContext<'_>,
        at: ObjectRef,
        after: Graphic,
        label: &'static str,
    ) -> Result<Self> {
        let object = ctx.scene.get(&at)?;
        if object.graphic == after {
            return Err(EmptyResultError::NoChange.into());
        }
        let cmd = Self {
            id: object.id,
            before: object.graphic.clone(),
            at,
            after,
            label,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn dirty_box(&self) -> BBox {
        self.before.bounds().union(&self.after.bounds())
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        let after = self.after.clone();
        modify(ctx, &self.at, self.id, |o| {
            o.graphic = after;
            Ok(())
        })
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        let before = self.before.clone();
        modify(ctx, &self.at, self.id, |o| {
            o.graphic = before;
            Ok(())
        })
    }
}

#[derive(Debug, Clone)]
pub struct RestyleObject {
    pub at: ObjectRef,
    pub id: ObjectId,
    pub before: Style,
    pub after: Style,
    pub bounds: BBox,
}

impl RestyleObject {
    pub fn new(ctx: &mut EditContext<'_>, at: ObjectRef, after: Style) -> Result<Self> {
        let object = ctx.scene.get(&at)?;
        let before = object
            .graphic
            .style()
            .ok_or(InvariantError::WrongKind {
                id: object.id,
                expected: "styled shape",
            })?
            .clone();
        if before == after {
            return Err(EmptyResultError::NoChange.into());
        }
        let cmd = Self {
            id: object.id,
            bounds: object.bounds(),
            at,
            before,
            after,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    /// Geometric box grown by the wider of the two stroke overhangs.
    pub fn dirty_box(&self) -> BBox {
        let overhang = self.before.stroke_overhang().max(self.after.stroke_overhang());
        self.bounds.inflate(overhang)
    }

    fn apply(&self, ctx: &mut EditContext<'_>, style: &Style) -> Result<()> {
        let id = self.id;
        modify(ctx, &self.at, id, |o| {
            let slot = o.graphic.style_mut().ok_or(InvariantError::WrongKind {
                id,
                expected: "styled shape",
            })?;
            *slot = style.clone();
            Ok(())
        })?;
        ctx.dirty.register(&self.dirty_box());
        Ok(())
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, &self.after)
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, &self.before)
    }
}

fn text_of(object: &Drawable) -> Result<&crate::model::TextShape> {
    match &object.graphic {
        Graphic::Text(t) => Ok(t),
        _ => Err(InvariantError::WrongKind {
            id: object.id,
            expected: "text",
        }
        .into()),
    }
}

fn with_text(
    ctx: &mut EditContext<'_>,
    at: &ObjectRef,
    id: ObjectId,
    f: impl FnOnce(&mut crate::model::TextShape),
) -> Result<()> {
    modify(ctx, at, id, |o| match &mut o.graphic {
        Graphic::Text(t) => {
            f(t);
            Ok(())
        }
        _ => Err(InvariantError::WrongKind {
            id,
            expected: "text",
        }
        .into()),
    })
}

/// Font change of a text; the extent is measured once at construction.
#[derive(Debug, Clone)]
pub struct RefontText {
    pub at: ObjectRef,
    pub id: ObjectId,
    pub before: (Font, TextExtent),
    pub after: (Font, TextExtent),
    bounds: (BBox, BBox),
}

impl RefontText {
    pub fn new(ctx: &mut EditContext<'_>, at: ObjectRef, font: Font) -> Result<Self> {
        let object = ctx.scene.get(&at)?;
        let text = text_of(object)?;
        if text.font == font {
            return Err(EmptyResultError::NoChange.into());
        }
        let updated = text.with_font(font, ctx.measure);
        let cmd = Self {
            id: object.id,
            before: (text.font.clone(), text.extent),
            after: (updated.font.clone(), updated.extent),
            bounds: (text.bounds(), updated.bounds()),
            at,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn dirty_box(&self) -> BBox {
        self.bounds.0.union(&self.bounds.1)
    }

    fn apply(&self, ctx: &mut EditContext<'_>, (font, extent): &(Font, TextExtent)) -> Result<()> {
        with_text(ctx, &self.at, self.id, |t| {
            t.font = font.clone();
            t.extent = *extent;
        })
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, &self.after)
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, &self.before)
    }
}

/// Content change of a text.
#[derive(Debug, Clone)]
pub struct RetextText {
    pub at: ObjectRef,
    pub id: ObjectId,
    pub before: (String, TextExtent),
    pub after: (String, TextExtent),
    bounds: (BBox, BBox),
}

impl RetextText {
    pub fn new(ctx: &mut EditContext<'_>, at: ObjectRef, content: String) -> Result<Self> {
        let object = ctx.scene.get(&at)?;
        let text = text_of(object)?;
        if text.content == content {
            return Err(EmptyResultError::NoChange.into());
        }
        let updated = text.with_content(content, ctx.measure);
        let cmd = Self {
            id: object.id,
            before: (text.content.clone(), text.extent),
            after: (updated.content.clone(), updated.extent),
            bounds: (text.bounds(), updated.bounds()),
            at,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    pub fn dirty_box(&self) -> BBox {
        self.bounds.0.union(&self.bounds.1)
    }

    fn apply(&self, ctx: &mut EditContext<'_>, (content, extent): &(String, TextExtent)) -> Result<()> {
        with_text(ctx, &self.at, self.id, |t| {
            t.content = content.clone();
            t.extent = *extent;
        })
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, &self.after)
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, &self.before)
    }
}

#[derive(Debug, Clone)]
pub struct SelectObject {
    pub at: ObjectRef,
    pub id: ObjectId,
    pub selected: bool,
    pub bounds: BBox,
}

impl SelectObject {
    pub fn new(ctx: &mut EditContext<'_>, at: ObjectRef, selected: bool) -> Result<Self> {
        let object = ctx.scene.get(&at)?;
        if object.selected == selected {
            return Err(EmptyResultError::NoChange.into());
        }
        let cmd = Self {
            id: object.id,
            bounds: object.bounds(),
            at,
            selected,
        };
        cmd.redo(ctx)?;
        Ok(cmd)
    }

    fn apply(&self, ctx: &mut EditContext<'_>, selected: bool) -> Result<()> {
        let object = ctx.scene.expect_mut(&self.at, self.id)?;
        object.selected = selected;
        ctx.dirty.register(&self.bounds);
        Ok(())
    }

    pub fn redo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, self.selected)
    }

    pub fn undo(&self, ctx: &mut EditContext<'_>) -> Result<()> {
        self.apply(ctx, !self.selected)
    }
}
