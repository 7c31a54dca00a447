//! Path-edit operations dispatched over the editable graphic kinds.

use drawkit_core::{Result, TopologyError};

use super::Graphic;
use crate::model::{CloseMode, ControlPoint, Conversion, Point};

impl Graphic {
    fn not_a_path(&self) -> drawkit_core::Error {
        TopologyError::NotAPath {
            kind: self.kind_name(),
        }
        .into()
    }

    fn unsupported(&self, operation: &'static str) -> drawkit_core::Error {
        TopologyError::Unsupported {
            operation,
            kind: self.kind_name(),
        }
        .into()
    }

    pub fn is_editable_path(&self) -> bool {
        matches!(self, Graphic::Path(_) | Graphic::Symmetric(_))
    }

    pub fn control_count(&self) -> Result<usize> {
        match self {
            Graphic::Path(p) => Ok(p.control_count()),
            Graphic::Symmetric(s) => Ok(s.control_count()),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn control(&self, index: usize) -> Result<ControlPoint> {
        match self {
            Graphic::Path(p) => p.control(index),
            Graphic::Symmetric(s) => s.control(index),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn next_control(&self, index: usize) -> Result<usize> {
        match self {
            Graphic::Path(p) => Ok(p.next_control(index)),
            Graphic::Symmetric(s) => Ok(s.next_control(index)),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn previous_control(&self, index: usize) -> Result<usize> {
        match self {
            Graphic::Path(p) => Ok(p.previous_control(index)),
            Graphic::Symmetric(s) => Ok(s.previous_control(index)),
            _ => Err(self.not_a_path()),
        }
    }

    /// Converts the segment owning `control`.
    pub fn converted_at(&self, control: usize, conversion: Conversion) -> Result<Graphic> {
        match self {
            Graphic::Path(p) => {
                let (segment, _) = p.locate(control)?;
                Ok(Graphic::Path(p.with_segment_converted(segment, conversion)?))
            }
            Graphic::Symmetric(s) => Ok(Graphic::Symmetric(s.converted_at(control, conversion)?)),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn with_control_moved(&self, control: usize, to: Point) -> Result<Graphic> {
        match self {
            Graphic::Path(p) => Ok(Graphic::Path(p.with_control_moved(control, to)?)),
            Graphic::Symmetric(s) => Ok(Graphic::Symmetric(s.with_control_moved(control, to)?)),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn with_point_added(&self, control: usize) -> Result<(Graphic, usize)> {
        match self {
            Graphic::Path(p) => p
                .with_point_added(control)
                .map(|(p, i)| (Graphic::Path(p), i)),
            Graphic::Symmetric(s) => s
                .with_point_added(control)
                .map(|(s, i)| (Graphic::Symmetric(s), i)),
            _ => Err(self.not_a_path()),
        }
    }

    /// `Ok(None)` when nothing of the shape remains.
    pub fn with_point_deleted(&self, control: usize) -> Result<Option<(Graphic, usize)>> {
        match self {
            Graphic::Path(p) => Ok(p
                .with_point_deleted(control)?
                .map(|(p, i)| (Graphic::Path(p), i))),
            Graphic::Symmetric(s) => Ok(s
                .with_point_deleted(control)?
                .map(|(s, i)| (Graphic::Symmetric(s), i))),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn made_continuous(&self, control: usize, equi: bool) -> Result<Graphic> {
        match self {
            Graphic::Path(p) => Ok(Graphic::Path(p.made_continuous(control, equi)?)),
            Graphic::Symmetric(s) => Ok(Graphic::Symmetric(s.made_continuous(control, equi)?)),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn opened(&self, remove_last: bool) -> Result<Graphic> {
        match self {
            Graphic::Path(p) => Ok(Graphic::Path(p.opened(remove_last)?)),
            Graphic::Symmetric(_) => Err(self.unsupported("open")),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn closed(&self, mode: CloseMode) -> Result<Graphic> {
        match self {
            Graphic::Path(p) => Ok(Graphic::Path(p.closed(mode)?)),
            Graphic::Symmetric(_) => Err(self.unsupported("close")),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn broken_at(&self, control: usize) -> Result<(Graphic, Graphic)> {
        match self {
            Graphic::Path(p) => {
                let (head, tail) = p.broken_at(control)?;
                Ok((Graphic::Path(head), Graphic::Path(tail)))
            }
            Graphic::Symmetric(_) => Err(self.unsupported("break")),
            _ => Err(self.not_a_path()),
        }
    }

    pub fn toggled_anchor(&self, slot: AnchorSlot) -> Result<Graphic> {
        match (self, slot) {
            (Graphic::Symmetric(s), AnchorSlot::Join) => Ok(Graphic::Symmetric(s.toggled_join_anchor())),
            (Graphic::Symmetric(s), AnchorSlot::Closing) => {
                Ok(Graphic::Symmetric(s.toggled_closing_anchor()))
            }
            _ => Err(self.unsupported("toggle the anchoring of")),
        }
    }
}

/// Nullable slot of a symmetric path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSlot {
    Join,
    Closing,
}
