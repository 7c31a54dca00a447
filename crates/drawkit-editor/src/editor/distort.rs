//! Four-corner distortion of the single selected path.

use tracing::debug;

use drawkit_core::{EmptyResultError, ModeError, Result};

use super::Editor;
use crate::bbox::{BBox, Hotspot};
use crate::commands::EditCommand;
use crate::distortion::Distortion;
use crate::model::{Graphical, Point};
use crate::scene::{Drawable, Graphic, ObjectRef};
use crate::tools::{Interaction, Tool};

impl Editor {
    fn distortion(&self) -> Result<&Distortion> {
        match &self.interaction {
            Interaction::Distortion(d) => Ok(d),
            _ => Err(ModeError::NotActive {
                expected: "distortion",
            }
            .into()),
        }
    }

    pub fn begin_distortion(&mut self) -> Result<()> {
        self.require_idle()?;
        self.require_tool(Tool::Select)?;
        let indices = self.scene.selected_indices();
        let &[index] = indices.as_slice() else {
            return Err(EmptyResultError::NothingSelected.into());
        };
        let object = &self.scene.objects()[index];
        let distortion = Distortion::new(ObjectRef::root(index), object.id, &object.graphic)?;
        debug!("Starting distortion of {}", object.id);
        self.interaction = Interaction::Distortion(distortion);
        Ok(())
    }

    /// Drags one corner of the mesh. Returns false for edge hotspots.
    pub fn move_distortion_corner(&mut self, corner: Hotspot, to: Point) -> Result<bool> {
        let before = self.distortion_bounds()?;
        let Interaction::Distortion(d) = &mut self.interaction else {
            return Ok(false);
        };
        if !d.move_corner(corner, to) {
            return Ok(false);
        }
        let after = self.distortion_bounds()?;
        self.dirty.register_change(&before, &after);
        Ok(true)
    }

    fn distortion_bounds(&self) -> Result<BBox> {
        let d = self.distortion()?;
        let object = self.scene.expect(&d.target, d.id)?;
        let mesh = BBox::from_points(d.corners());
        Ok(d.preview(&object.graphic)?.bounds().union(&mesh))
    }

    /// The distorted shape as it would be committed.
    pub fn distortion_preview(&self) -> Result<Graphic> {
        let d = self.distortion()?;
        let object = self.scene.expect(&d.target, d.id)?;
        d.preview(&object.graphic)
    }

    /// Commits the distortion as one undoable edit. A symmetric path becomes
    /// a new plain path in its place.
    pub fn finish_distortion(&mut self) -> Result<()> {
        let d = self.distortion()?.clone();
        self.interaction = Interaction::Idle;
        if d.is_identity() {
            debug!("Distortion of {} left the shape unchanged", d.id);
            return Ok(());
        }
        let object = self.scene.expect(&d.target, d.id)?;
        let after = d.preview(&object.graphic)?;
        let symmetric = matches!(object.graphic, Graphic::Symmetric(_));
        let selected = object.selected;
        let result = self.transaction("Distort", |ctx, builder| {
            let command = if symmetric {
                let replacement = Drawable::new(after).selected(selected);
                EditCommand::substitute(ctx, d.target.clone(), replacement, "Distort")?
            } else {
                EditCommand::reshape(ctx, d.target.clone(), after, "Distort")?
            };
            builder.push(command);
            Ok(())
        });
        if result.is_err() {
            self.interaction = Interaction::Distortion(d);
        }
        result
    }

    pub fn abandon_distortion(&mut self) -> Result<()> {
        let mesh = BBox::from_points(self.distortion()?.corners());
        debug!("Abandoning distortion");
        self.dirty.register(&mesh.union(&self.distortion_bounds().unwrap_or(mesh)));
        self.interaction = Interaction::Idle;
        Ok(())
    }
}
