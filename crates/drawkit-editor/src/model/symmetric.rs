//! Symmetric paths: a half-path mirrored about an axis segment.
//!
//! Flat control order is half-path, join, axis (start, end), closing. The join
//! runs from the half-path end to the axis start and the closing slot from the
//! axis end back to the half-path start; either is `None` when anchored (an
//! implicit straight connection).

use serde::{Deserialize, Serialize};

use drawkit_core::constants::POINT_EPSILON;
use drawkit_core::{Result, TopologyError};

use super::path::resolve;
use super::segment::{outline_bounds, render_outline};
use super::{
    CloseMode, Closure, ControlPoint, Conversion, Graphical, PathShape, Piece, Point, Segment,
    Style, SubOutline,
};
use crate::bbox::BBox;
use crate::geometry::mirror_point;

/// Where a flat control index lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetricPart {
    Half { segment: usize, local: usize },
    Join(usize),
    Axis(usize),
    Closing(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetricPath {
    half: Vec<Segment>,
    axis_start: ControlPoint,
    axis_end: ControlPoint,
    join: Option<Segment>,
    closing: Option<Segment>,
    pub style: Style,
}

impl SymmetricPath {
    /// Creates a symmetric path with anchored join and closing.
    pub fn new(half: Vec<Segment>, axis_start: Point, axis_end: Point, style: Style) -> Result<Self> {
        let path = Self {
            half,
            axis_start: ControlPoint::free(axis_start),
            axis_end: ControlPoint::free(axis_end),
            join: None,
            closing: None,
            style,
        };
        path.check()?;
        Ok(path)
    }

    pub fn half(&self) -> &[Segment] {
        &self.half
    }

    pub fn axis(&self) -> (Point, Point) {
        (self.axis_start.pos, self.axis_end.pos)
    }

    pub fn join(&self) -> Option<&Segment> {
        self.join.as_ref()
    }

    pub fn closing(&self) -> Option<&Segment> {
        self.closing.as_ref()
    }

    fn check(&self) -> Result<()> {
        match self.half.first() {
            Some(Segment::Move { .. }) => {}
            _ => return Err(TopologyError::FirstSegmentMustBeMove.into()),
        }
        for seg in &self.half[1..] {
            if seg.starts_subpath() {
                return Err(TopologyError::MultipleSubpaths.into());
            }
            if seg.is_partial() {
                return Err(TopologyError::MisplacedPartial { kind: seg.name() }.into());
            }
        }
        for slot in [&self.join, &self.closing].into_iter().flatten() {
            if !slot.is_partial() {
                return Err(TopologyError::IllegalConversion {
                    from: slot.name(),
                    to: "symmetric slot",
                }
                .into());
            }
        }
        if self.axis_start.pos.distance_to(&self.axis_end.pos) < POINT_EPSILON {
            return Err(TopologyError::DegenerateAxis.into());
        }
        Ok(())
    }

    fn half_path(&self) -> Result<PathShape> {
        PathShape::from_parts(self.half.clone(), Closure::Open, self.style.clone())
    }

    fn with_half(&self, half: &PathShape) -> Result<Self> {
        let mut out = self.clone();
        out.half = half.segments().to_vec();
        out.check()?;
        Ok(out)
    }

    fn half_ends(&self) -> (Point, Point) {
        let ends = resolve(&self.half);
        let start = ends.first().map(|e| e.1).unwrap_or_default();
        let end = ends.last().map(|e| e.1).unwrap_or_default();
        (start, end)
    }

    // ---- control indexing ------------------------------------------------

    fn half_control_count(&self) -> usize {
        self.half.iter().map(Segment::control_count).sum()
    }

    fn slot_count(slot: &Option<Segment>) -> usize {
        slot.as_ref().map_or(0, Segment::control_count)
    }

    pub fn control_count(&self) -> usize {
        self.half_control_count() + Self::slot_count(&self.join) + 2 + Self::slot_count(&self.closing)
    }

    pub fn locate(&self, index: usize) -> Result<SymmetricPart> {
        let mut i = index;
        for (segment, seg) in self.half.iter().enumerate() {
            let n = seg.control_count();
            if i < n {
                return Ok(SymmetricPart::Half { segment, local: i });
            }
            i -= n;
        }
        let join = Self::slot_count(&self.join);
        if i < join {
            return Ok(SymmetricPart::Join(i));
        }
        i -= join;
        if i < 2 {
            return Ok(SymmetricPart::Axis(i));
        }
        i -= 2;
        if i < Self::slot_count(&self.closing) {
            return Ok(SymmetricPart::Closing(i));
        }
        Err(TopologyError::NoSuchControl {
            index,
            count: self.control_count(),
        }
        .into())
    }

    pub fn control(&self, index: usize) -> Result<ControlPoint> {
        let slot_control = |slot: &Option<Segment>, local: usize| {
            slot.as_ref().map(|s| s.controls()[local])
        };
        let cp = match self.locate(index)? {
            SymmetricPart::Half { segment, local } => Some(self.half[segment].controls()[local]),
            SymmetricPart::Join(local) => slot_control(&self.join, local),
            SymmetricPart::Axis(0) => Some(self.axis_start),
            SymmetricPart::Axis(_) => Some(self.axis_end),
            SymmetricPart::Closing(local) => slot_control(&self.closing, local),
        };
        cp.ok_or_else(|| {
            TopologyError::NoSuchControl {
                index,
                count: self.control_count(),
            }
            .into()
        })
    }

    pub fn next_control(&self, index: usize) -> usize {
        (index + 1) % self.control_count()
    }

    pub fn previous_control(&self, index: usize) -> usize {
        let count = self.control_count();
        (index + count - 1) % count
    }

    // ---- outline -----------------------------------------------------------

    /// The full mirrored outline as one closed subpath.
    pub fn outline(&self) -> Vec<SubOutline> {
        let (p0, pn) = self.half_ends();
        let (a0, a1) = self.axis();
        let mirror = |p: Point| mirror_point(p, a0, a1);

        let ends = resolve(&self.half);
        let half: Vec<Piece> = self
            .half
            .iter()
            .zip(&ends)
            .filter_map(|(seg, &(start, end))| seg.piece(start, end))
            .collect();
        let slot_piece = |slot: &Option<Segment>, from: Point, to: Point| {
            slot.as_ref()
                .and_then(|s| s.piece(from, to))
                .unwrap_or(Piece::Line { from, to })
        };
        let join = slot_piece(&self.join, pn, a0);
        let closing = slot_piece(&self.closing, a1, p0);

        let mut pieces = half.clone();
        pieces.push(join);
        pieces.push(join.mapped(mirror).reversed());
        pieces.extend(half.iter().rev().map(|p| p.mapped(mirror).reversed()));
        pieces.push(closing.mapped(mirror).reversed());
        pieces.push(closing);

        vec![SubOutline {
            start: p0,
            pieces,
            closed: true,
        }]
    }

    /// Flattens the symmetric outline into a closed path.
    pub fn to_path(&self) -> Result<PathShape> {
        let outline = self.outline();
        let sub = &outline[0];
        let mut segments = vec![Segment::move_to(sub.start)];
        let (closing, body) = sub
            .pieces
            .split_last()
            .ok_or(TopologyError::NotEnoughSegments {
                required: 1,
                found: 0,
            })?;
        segments.extend(body.iter().map(Piece::to_segment));
        segments.push(closing.to_partial());
        let mode = match closing {
            Piece::Line { .. } => CloseMode::Line,
            _ => CloseMode::Continuous,
        };
        PathShape::from_parts(
            segments,
            Closure::Closed {
                mode,
                merged_end: None,
            },
            self.style.clone(),
        )
    }

    // ---- slots ---------------------------------------------------------------

    /// Swaps the join between anchored and a straight partial line.
    pub fn toggled_join_anchor(&self) -> Self {
        let mut out = self.clone();
        out.join = match out.join {
            Some(_) => None,
            None => Some(Segment::PartialLine),
        };
        out
    }

    /// Swaps the closing slot between anchored and a straight partial line.
    pub fn toggled_closing_anchor(&self) -> Self {
        let mut out = self.clone();
        out.closing = match out.closing {
            Some(_) => None,
            None => Some(Segment::PartialLine),
        };
        out
    }

    pub fn with_join(&self, join: Option<Segment>) -> Result<Self> {
        let mut out = self.clone();
        out.join = join;
        out.check()?;
        Ok(out)
    }

    pub fn with_closing(&self, closing: Option<Segment>) -> Result<Self> {
        let mut out = self.clone();
        out.closing = closing;
        out.check()?;
        Ok(out)
    }

    // ---- pure editing operations ---------------------------------------------

    /// Converts the half-path segment owning `control`.
    pub fn converted_at(&self, control: usize, conversion: Conversion) -> Result<Self> {
        match self.locate(control)? {
            SymmetricPart::Half { segment, .. } => {
                self.with_half(&self.half_path()?.with_segment_converted(segment, conversion)?)
            }
            SymmetricPart::Join(_) => Err(TopologyError::SlotNotConvertible { slot: "join" }.into()),
            SymmetricPart::Closing(_) => {
                Err(TopologyError::SlotNotConvertible { slot: "closing" }.into())
            }
            SymmetricPart::Axis(_) => Err(TopologyError::AxisNotConvertible.into()),
        }
    }

    pub fn with_control_moved(&self, control: usize, to: Point) -> Result<Self> {
        let mut out = self.clone();
        match self.locate(control)? {
            SymmetricPart::Half { .. } => {
                return self.with_half(&self.half_path()?.with_control_moved(control, to)?)
            }
            SymmetricPart::Join(local) => set_slot_control(&mut out.join, local, to),
            SymmetricPart::Closing(local) => set_slot_control(&mut out.closing, local, to),
            SymmetricPart::Axis(0) => out.axis_start = ControlPoint::free(to),
            SymmetricPart::Axis(_) => out.axis_end = ControlPoint::free(to),
        }
        out.check()?;
        Ok(out)
    }

    pub fn with_point_added(&self, control: usize) -> Result<(Self, usize)> {
        match self.locate(control)? {
            SymmetricPart::Half { .. } => {
                let (half, anchor) = self.half_path()?.with_point_added(control)?;
                Ok((self.with_half(&half)?, anchor))
            }
            SymmetricPart::Join(_) => Err(TopologyError::NotSubdividable { kind: "join" }.into()),
            SymmetricPart::Closing(_) => {
                Err(TopologyError::NotSubdividable { kind: "closing" }.into())
            }
            SymmetricPart::Axis(_) => Err(TopologyError::AxisNotConvertible.into()),
        }
    }

    /// Deletes `control`. `None` means the half-path is gone.
    pub fn with_point_deleted(&self, control: usize) -> Result<Option<(Self, usize)>> {
        let mut out = self.clone();
        match self.locate(control)? {
            SymmetricPart::Half { .. } => match self.half_path()?.with_point_deleted(control)? {
                Some((half, _)) => out = self.with_half(&half)?,
                None => return Ok(None),
            },
            SymmetricPart::Join(local) => {
                out.join = self.join.as_ref().and_then(|s| s.without_control(local));
            }
            SymmetricPart::Closing(local) => {
                out.closing = self.closing.as_ref().and_then(|s| s.without_control(local));
            }
            SymmetricPart::Axis(_) => return Err(TopologyError::AxisNotConvertible.into()),
        }
        let selected = control.min(out.control_count() - 1);
        Ok(Some((out, selected)))
    }

    pub fn made_continuous(&self, control: usize, equi: bool) -> Result<Self> {
        match self.locate(control)? {
            SymmetricPart::Half { .. } => {
                self.with_half(&self.half_path()?.made_continuous(control, equi)?)
            }
            _ => Err(TopologyError::NoNeighborHandle.into()),
        }
    }
}

fn set_slot_control(slot: &mut Option<Segment>, local: usize, to: Point) {
    if let Some(cp) = slot.as_mut().and_then(|s| s.control_mut(local)) {
        *cp = ControlPoint::free(to);
    }
}

impl Graphical for SymmetricPath {
    fn render(&self) -> lyon::path::Path {
        render_outline(&self.outline())
    }

    fn bounds(&self) -> BBox {
        outline_bounds(&self.outline())
    }

    fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point) {
        for seg in &mut self.half {
            seg.map_points(f);
        }
        self.axis_start.pos = f(self.axis_start.pos);
        self.axis_end.pos = f(self.axis_end.pos);
        for slot in [&mut self.join, &mut self.closing].into_iter().flatten() {
            slot.map_points(f);
        }
    }
}
