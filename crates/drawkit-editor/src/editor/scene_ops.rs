//! Object-level operations: creation, deletion, selection, grouping, ordering
//! and styling.
//!
//! Multi-object operations snapshot the affected indices first, then post one
//! command per object inside a single transaction. Removals run from the
//! highest index down and insertions from the lowest up, so every captured
//! index stays valid while the transaction runs.

use drawkit_core::{EmptyResultError, Result};

use super::Editor;
use crate::bbox::{BBox, Hotspot};
use crate::commands::{CompoundBuilder, EditCommand, EditContext};
use crate::model::{Font, Graphical, Paint, PathShape, Point, Style};
use crate::scene::{ContainerPath, Drawable, Graphic, ObjectRef};
use crate::tools::Tool;

/// Deselects every selected root object except `keep`.
pub(super) fn deselect_others(
    ctx: &mut EditContext<'_>,
    builder: &mut CompoundBuilder,
    keep: Option<usize>,
) -> Result<()> {
    for index in ctx.scene.selected_indices() {
        if Some(index) != keep {
            builder.push(EditCommand::select(ctx, ObjectRef::root(index), false)?);
        }
    }
    Ok(())
}

impl Editor {
    fn selected_or_fail(&self) -> Result<Vec<usize>> {
        let indices = self.scene.selected_indices();
        if indices.is_empty() {
            Err(EmptyResultError::NothingSelected.into())
        } else {
            Ok(indices)
        }
    }

    // ---- creation ---------------------------------------------------------

    /// Adds `graphic` on top of the scene as the only selected object.
    pub fn add_object(&mut self, graphic: Graphic) -> Result<usize> {
        self.require_idle()?;
        let index = self.scene.len();
        let object = Drawable::new(graphic);
        let label = format!("Add {}", object.graphic.kind_name());
        self.transaction(&label, |ctx, builder| {
            deselect_others(ctx, builder, None)?;
            builder.push(EditCommand::insert(ctx, ContainerPath::root(), index, object)?);
            builder.push(EditCommand::select(ctx, ObjectRef::root(index), true)?);
            Ok(())
        })?;
        Ok(index)
    }

    /// Creates a rectangle with the default style. Needs the rectangle tool.
    pub fn create_rectangle(&mut self, corner: Point, opposite: Point) -> Result<usize> {
        self.require_idle()?;
        self.require_tool(Tool::Rectangle)?;
        let bbox = BBox::from_points([corner, opposite]);
        let index = self.scene.len();
        self.transaction("Add rectangle", |ctx, builder| {
            deselect_others(ctx, builder, None)?;
            builder.push(EditCommand::create_rectangle(
                ctx,
                ContainerPath::root(),
                index,
                bbox,
            )?);
            Ok(())
        })?;
        Ok(index)
    }

    /// Creates a text with the default font and style. Needs the text tool.
    pub fn create_text(&mut self, anchor: Point, content: &str) -> Result<usize> {
        self.require_idle()?;
        self.require_tool(Tool::Text)?;
        if content.is_empty() {
            return Err(EmptyResultError::NoChange.into());
        }
        let index = self.scene.len();
        self.transaction("Add text", |ctx, builder| {
            deselect_others(ctx, builder, None)?;
            builder.push(EditCommand::create_text(
                ctx,
                ContainerPath::root(),
                index,
                anchor,
                content,
            )?);
            Ok(())
        })?;
        Ok(index)
    }

    /// Deletes every selected root object.
    pub fn delete_selection(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        self.transaction("Delete selection", |ctx, builder| {
            for &index in indices.iter().rev() {
                builder.push(EditCommand::remove(ctx, ObjectRef::root(index))?);
            }
            Ok(())
        })
    }

    // ---- selection --------------------------------------------------------

    pub fn select(&mut self, index: usize, selected: bool) -> Result<()> {
        self.require_idle()?;
        let label = if selected { "Select" } else { "Deselect" };
        self.transaction(label, |ctx, builder| {
            builder.push(EditCommand::select(ctx, ObjectRef::root(index), selected)?);
            Ok(())
        })
    }

    /// Selects the topmost object under `p`.
    ///
    /// Without `extend` everything else is deselected first, and a click on
    /// empty space clears the selection.
    pub fn click_select(&mut self, p: Point, extend: bool) -> Result<Option<usize>> {
        self.require_idle()?;
        self.hit_cycler.reset();
        let hit = self.scene.hit_test(p, self.hit_tolerance);
        self.select_hit(hit, extend)?;
        Ok(hit)
    }

    /// Repeated double-clicks at one point walk down the stack of hits.
    pub fn cycle_select(&mut self, p: Point) -> Result<Option<usize>> {
        self.require_idle()?;
        let hit = self.hit_cycler.cycle(&self.scene, p, self.hit_tolerance);
        self.select_hit(hit, false)?;
        Ok(hit)
    }

    fn select_hit(&mut self, hit: Option<usize>, extend: bool) -> Result<()> {
        let result = self.transaction("Select", |ctx, builder| {
            if !extend {
                deselect_others(ctx, builder, hit)?;
            }
            if let Some(index) = hit {
                builder.push_or_skip(EditCommand::select(ctx, ObjectRef::root(index), true))?;
            }
            Ok(())
        });
        ignore_no_change(result)
    }

    pub fn select_all(&mut self) -> Result<()> {
        self.require_idle()?;
        self.transaction("Select all", |ctx, builder| {
            for index in 0..ctx.scene.len() {
                builder.push_or_skip(EditCommand::select(ctx, ObjectRef::root(index), true))?;
            }
            Ok(())
        })
    }

    pub fn deselect_all(&mut self) -> Result<()> {
        self.require_idle()?;
        self.transaction("Deselect all", |ctx, builder| {
            deselect_others(ctx, builder, None)
        })
    }

    // ---- geometry ---------------------------------------------------------

    fn reshape_selection(
        &mut self,
        label: &'static str,
        change: impl Fn(&mut Graphic),
    ) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        self.transaction(label, |ctx, builder| {
            for index in indices {
                let at = ObjectRef::root(index);
                let mut graphic = ctx.scene.get(&at)?.graphic.clone();
                change(&mut graphic);
                builder.push_or_skip(EditCommand::reshape(ctx, at, graphic, label))?;
            }
            Ok(())
        })
    }

    pub fn move_selection(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.reshape_selection("Move", |g| g.translate(dx, dy))
    }

    /// Scales the selection so that the handle `hotspot` lands on `to` while the
    /// opposite handle stays put.
    pub fn resize_selection(&mut self, hotspot: Hotspot, to: Point) -> Result<()> {
        let bounds = self.selection_bounds();
        if bounds.is_empty() {
            return Err(EmptyResultError::NothingSelected.into());
        }
        let (sx, sy, origin) = bounds.scale_for_handle(hotspot, to);
        if !sx.is_finite() || !sy.is_finite() || sx == 0.0 || sy == 0.0 {
            return Err(EmptyResultError::NoChange.into());
        }
        self.reshape_selection("Resize", |g| g.scale(sx, sy, origin))
    }

    // ---- grouping ---------------------------------------------------------

    pub fn group_selection(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        self.transaction("Group", |ctx, builder| {
            builder.push(EditCommand::group(ctx, ContainerPath::root(), &indices)?);
            Ok(())
        })
    }

    /// Replaces every selected group by its members.
    pub fn ungroup_selection(&mut self) -> Result<()> {
        self.require_idle()?;
        let groups: Vec<usize> = self
            .scene
            .selected_indices()
            .into_iter()
            .filter(|&i| self.scene.objects()[i].as_group().is_some())
            .collect();
        if groups.is_empty() {
            return Err(EmptyResultError::NothingSelected.into());
        }
        self.transaction("Ungroup", |ctx, builder| {
            for &index in groups.iter().rev() {
                builder.push(EditCommand::ungroup(ctx, ObjectRef::root(index))?);
            }
            Ok(())
        })
    }

    /// Joins the selected paths into one multi-subpath path at the position of
    /// the lowest of them.
    pub fn merge_selected_paths(&mut self) -> Result<()> {
        self.require_idle()?;
        let targets: Vec<(usize, PathShape)> = self
            .scene
            .selected_indices()
            .into_iter()
            .filter_map(|i| match &self.scene.objects()[i].graphic {
                Graphic::Path(p) => Some((i, p.clone())),
                _ => None,
            })
            .collect();
        if targets.len() < 2 {
            return Err(EmptyResultError::NothingToMerge {
                found: targets.len(),
            }
            .into());
        }
        let paths: Vec<PathShape> = targets.iter().map(|(_, p)| p.clone()).collect();
        let merged = PathShape::merged(&paths)?;
        let lowest = targets[0].0;
        self.transaction("Merge paths", |ctx, builder| {
            for (index, _) in targets.iter().rev() {
                builder.push(EditCommand::remove(ctx, ObjectRef::root(*index))?);
            }
            let object = Drawable::new(Graphic::Path(merged)).selected(true);
            builder.push(EditCommand::insert(ctx, ContainerPath::root(), lowest, object)?);
            Ok(())
        })
    }

    /// Splits the single selected path into one path per subpath.
    pub fn split_selected_path(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        let Some((index, path)) = indices.iter().find_map(|&i| match &self.scene.objects()[i].graphic {
            Graphic::Path(p) => Some((i, p.clone())),
            _ => None,
        }) else {
            return Err(EmptyResultError::NothingToSplit.into());
        };
        let parts = path.split_subpaths()?;
        self.transaction("Split path", |ctx, builder| {
            builder.push(EditCommand::remove(ctx, ObjectRef::root(index))?);
            for (offset, part) in parts.into_iter().enumerate() {
                let object = Drawable::new(Graphic::Path(part)).selected(true);
                builder.push(EditCommand::insert(
                    ctx,
                    ContainerPath::root(),
                    index + offset,
                    object,
                )?);
            }
            Ok(())
        })
    }

    // ---- ordering ---------------------------------------------------------

    /// Moves the selection to the top, keeping its relative order.
    pub fn bring_to_front(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        let last = self.scene.len() - 1;
        self.transaction("Bring to front", |ctx, builder| {
            for (moved, &index) in indices.iter().enumerate() {
                builder.push_or_skip(EditCommand::reorder(
                    ctx,
                    ContainerPath::root(),
                    index - moved,
                    last,
                ))?;
            }
            Ok(())
        })
    }

    /// Moves the selection to the bottom, keeping its relative order.
    pub fn send_to_back(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        self.transaction("Send to back", |ctx, builder| {
            for (moved, &index) in indices.iter().rev().enumerate() {
                builder.push_or_skip(EditCommand::reorder(
                    ctx,
                    ContainerPath::root(),
                    index + moved,
                    0,
                ))?;
            }
            Ok(())
        })
    }

    /// Moves each selected object one step up unless the one above is selected too.
    pub fn raise_selection(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        let len = self.scene.len();
        self.transaction("Raise", |ctx, builder| {
            let mut blocked = len;
            for &index in indices.iter().rev() {
                if index + 1 < blocked {
                    builder.push(EditCommand::reorder(ctx, ContainerPath::root(), index, index + 1)?);
                    blocked = index + 1;
                } else {
                    blocked = index;
                }
            }
            Ok(())
        })
    }

    /// Moves each selected object one step down unless the one below is selected too.
    pub fn lower_selection(&mut self) -> Result<()> {
        self.require_idle()?;
        let indices = self.selected_or_fail()?;
        self.transaction("Lower", |ctx, builder| {
            let mut floor = 0;
            for &index in &indices {
                if index > floor {
                    builder.push(EditCommand::reorder(ctx, ContainerPath::root(), index, index - 1)?);
                    floor = index;
                } else {
                    floor = index + 1;
                }
            }
            Ok(())
        })
    }

    // ---- style ------------------------------------------------------------

    /// Leaves below the selected root objects, groups included.
    fn selected_leaf_refs(&self) -> Result<Vec<ObjectRef>> {
        let mut leaves = Vec::new();
        for index in self.selected_or_fail()? {
            leaves.extend(self.scene.leaf_refs(&ObjectRef::root(index))?);
        }
        Ok(leaves)
    }

    fn restyle_selection(&mut self, label: &str, change: impl Fn(&mut Style)) -> Result<()> {
        self.require_idle()?;
        let leaves = self.selected_leaf_refs()?;
        self.transaction(label, |ctx, builder| {
            for at in leaves {
                let Some(style) = ctx.scene.get(&at)?.graphic.style() else {
                    continue;
                };
                let mut style = style.clone();
                change(&mut style);
                builder.push_or_skip(EditCommand::restyle(ctx, at, style))?;
            }
            Ok(())
        })
    }

    pub fn set_stroke(&mut self, paint: Option<Paint>) -> Result<()> {
        self.restyle_selection("Change stroke", |s| s.stroke = paint)
    }

    pub fn set_fill(&mut self, paint: Option<Paint>) -> Result<()> {
        self.restyle_selection("Change fill", |s| s.fill = paint)
    }

    pub fn set_stroke_width(&mut self, width: f64) -> Result<()> {
        self.restyle_selection("Change stroke width", |s| s.stroke_width = width)
    }

    /// Applies `font` to every selected text, groups included.
    pub fn set_font(&mut self, font: Font) -> Result<()> {
        self.require_idle()?;
        let leaves = self.selected_leaf_refs()?;
        self.transaction("Change font", |ctx, builder| {
            for at in leaves {
                if matches!(ctx.scene.get(&at)?.graphic, Graphic::Text(_)) {
                    builder.push_or_skip(EditCommand::refont(ctx, at, font.clone()))?;
                }
            }
            Ok(())
        })
    }
}

/// Selection clicks that change nothing are not an error.
fn ignore_no_change(result: Result<()>) -> Result<()> {
    match result {
        Err(drawkit_core::Error::EmptyResult(EmptyResultError::NoChange)) => Ok(()),
        other => other,
    }
}
