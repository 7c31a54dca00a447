//! Paths: ordered segment sequences with a closure state.
//!
//! Every editing operation on a path is pure. It validates the request, builds
//! the resulting path and leaves `self` untouched, so the command layer only
//! ever commits complete, valid geometry.

use serde::{Deserialize, Serialize};

use drawkit_core::constants::{HANDLE_CHORD_FRACTION, SUBDIVISION_T};
use drawkit_core::{EmptyResultError, Result, TopologyError};

use super::segment::{outline_bounds, render_outline};
use super::{ControlPoint, Conversion, Graphical, Point, Segment, Style, SubOutline};
use crate::bbox::BBox;
use crate::geometry::{along_chord, reflect_handle};

/// How a path was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseMode {
    /// Straight closing line.
    Line,
    /// Closing curve whose handles continue the neighbouring handles.
    Continuous,
    /// The last segment is demoted so that it ends on the first start.
    MergeEnds,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Closure {
    #[default]
    Open,
    Closed {
        mode: CloseMode,
        /// End dropped by [`CloseMode::MergeEnds`], restored when reopening.
        merged_end: Option<Point>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    segments: Vec<Segment>,
    closure: Closure,
    pub style: Style,
}

impl PathShape {
    /// A path holding a single move.
    pub fn new(start: Point, style: Style) -> Self {
        Self {
            segments: vec![Segment::move_to(start)],
            closure: Closure::Open,
            style,
        }
    }

    /// Builds a path from parts, checking the structural invariants.
    pub fn from_parts(segments: Vec<Segment>, closure: Closure, style: Style) -> Result<Self> {
        validate(&segments, &closure)?;
        Ok(Self {
            segments,
            closure,
            style,
        })
    }

    pub fn polyline(points: &[Point], style: Style) -> Result<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or(TopologyError::NotEnoughSegments {
                required: 1,
                found: 0,
            })?;
        let mut segments = vec![Segment::move_to(*first)];
        segments.extend(rest.iter().copied().map(Segment::line_to));
        Self::from_parts(segments, Closure::Open, style)
    }

    /// Closed axis-aligned rectangle, counter-clockwise from the south-west corner.
    pub fn rectangle(bbox: BBox, style: Style) -> Self {
        Self {
            segments: vec![
                Segment::move_to(bbox.min),
                Segment::line_to(Point::new(bbox.max.x, bbox.min.y)),
                Segment::line_to(bbox.max),
                Segment::line_to(Point::new(bbox.min.x, bbox.max.y)),
                Segment::PartialLine,
            ],
            closure: Closure::Closed {
                mode: CloseMode::Line,
                merged_end: None,
            },
            style,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.closure, Closure::Closed { .. })
    }

    pub fn drawing_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.draws()).count()
    }

    pub fn subpath_count(&self) -> usize {
        self.segments.iter().filter(|s| s.starts_subpath()).count()
    }

    /// Resolved `(start, end)` of every segment.
    pub fn endpoints(&self) -> Vec<(Point, Point)> {
        resolve(&self.segments)
    }

    fn final_subpath_start(&self) -> usize {
        self.segments
            .iter()
            .rposition(Segment::starts_subpath)
            .unwrap_or(0)
    }

    // ---- control indexing ------------------------------------------------

    pub fn control_count(&self) -> usize {
        self.segments.iter().map(Segment::control_count).sum()
    }

    /// Segment index and local control index of a flat control index.
    pub fn locate(&self, index: usize) -> Result<(usize, usize)> {
        let mut remaining = index;
        for (i, seg) in self.segments.iter().enumerate() {
            let n = seg.control_count();
            if remaining < n {
                return Ok((i, remaining));
            }
            remaining -= n;
        }
        Err(TopologyError::NoSuchControl {
            index,
            count: self.control_count(),
        }
        .into())
    }

    /// Flat index of control `local` of segment `segment`.
    pub fn control_index(&self, segment: usize, local: usize) -> usize {
        self.segments[..segment]
            .iter()
            .map(Segment::control_count)
            .sum::<usize>()
            + local
    }

    pub fn control(&self, index: usize) -> Result<ControlPoint> {
        let (seg, local) = self.locate(index)?;
        Ok(self.segments[seg].controls()[local])
    }

    pub fn next_control(&self, index: usize) -> usize {
        let count = self.control_count();
        if count == 0 {
            0
        } else {
            (index + 1) % count
        }
    }

    pub fn previous_control(&self, index: usize) -> usize {
        let count = self.control_count();
        if count == 0 {
            0
        } else {
            (index + count - 1) % count
        }
    }

    /// Resolved subpaths.
    pub fn outline(&self) -> Vec<SubOutline> {
        let ends = self.endpoints();
        let mut subs = Vec::new();
        let mut current: Option<SubOutline> = None;
        for (seg, &(start, end)) in self.segments.iter().zip(&ends) {
            match seg {
                Segment::Move { to } | Segment::ClosingMove { to } => {
                    if let Some(mut sub) = current.take() {
                        sub.closed = matches!(seg, Segment::ClosingMove { .. });
                        subs.push(sub);
                    }
                    current = Some(SubOutline {
                        start: to.pos,
                        pieces: Vec::new(),
                        closed: false,
                    });
                }
                drawing => {
                    if let (Some(sub), Some(piece)) = (current.as_mut(), drawing.piece(start, end)) {
                        sub.pieces.push(piece);
                    }
                }
            }
        }
        if let Some(mut sub) = current {
            sub.closed = self.is_closed();
            subs.push(sub);
        }
        subs
    }

    // ---- pure editing operations ---------------------------------------------

    /// Replaces segment `segment` with another kind.
    pub fn with_segment_converted(&self, segment: usize, conversion: Conversion) -> Result<Self> {
        let seg = self.segments.get(segment).ok_or(TopologyError::NoSuchControl {
            index: segment,
            count: self.segments.len(),
        })?;
        if segment == 0 {
            return Err(match conversion {
                Conversion::ToMove => EmptyResultError::NoChange.into(),
                _ => TopologyError::FirstSegmentMustBeMove.into(),
            });
        }
        let (start, end) = self.endpoints()[segment];
        let converted = seg.converted(conversion, start, end)?;

        let mut segments = self.segments.clone();
        segments[segment] = converted;
        Self::from_parts(segments, self.closure, self.style.clone())
    }

    /// Closes the path.
    pub fn closed(&self, mode: CloseMode) -> Result<Self> {
        if self.is_closed() {
            return Err(TopologyError::AlreadyClosed.into());
        }
        let first = self.final_subpath_start();
        let drawn = self.segments.len() - first - 1;
        let required = if mode == CloseMode::MergeEnds { 2 } else { 1 };
        if drawn < required {
            return Err(TopologyError::NotEnoughSegments {
                required,
                found: drawn,
            }
            .into());
        }

        let ends = self.endpoints();
        let sub_start = ends[first].1;
        let last_end = ends[ends.len() - 1].1;
        let mut segments = self.segments.clone();
        let mut merged_end = None;

        match mode {
            CloseMode::Line => segments.push(Segment::PartialLine),
            CloseMode::Continuous => {
                let c1 = match segments.last() {
                    Some(Segment::Bezier { c2, .. }) => {
                        reflect_handle(last_end, c2.effective(last_end), last_end, true)
                    }
                    _ => along_chord(last_end, sub_start, HANDLE_CHORD_FRACTION),
                };
                let c2 = match &segments[first + 1] {
                    Segment::Bezier { c1, .. } => {
                        reflect_handle(sub_start, c1.effective(sub_start), sub_start, true)
                    }
                    _ => along_chord(sub_start, last_end, HANDLE_CHORD_FRACTION),
                };
                segments.push(Segment::PartialBezier {
                    c1: c1.into(),
                    c2: c2.into(),
                });
            }
            CloseMode::MergeEnds => {
                if let Some(last) = segments.pop() {
                    merged_end = last.end();
                    segments.push(last.demoted()?);
                }
            }
        }

        Self::from_parts(
            segments,
            Closure::Closed { mode, merged_end },
            self.style.clone(),
        )
    }

    /// Opens a closed path.
    ///
    /// With `remove_last` the closing segment is dropped (a merged end is restored);
    /// otherwise it stays as a regular segment ending at the subpath start.
    pub fn opened(&self, remove_last: bool) -> Result<Self> {
        let Closure::Closed { mode, merged_end } = self.closure else {
            return Err(TopologyError::AlreadyOpen.into());
        };
        let (start, end) = self.endpoints().last().copied().unwrap_or_default();
        let mut segments = self.segments.clone();
        if let Some(closing) = segments.pop() {
            match (remove_last, mode, merged_end) {
                (true, CloseMode::MergeEnds, Some(merged)) => {
                    segments.push(closing.completed(start, merged))
                }
                (true, _, _) => {}
                (false, _, _) => segments.push(closing.completed(start, end)),
            }
        }
        Self::from_parts(segments, Closure::Open, self.style.clone())
    }

    /// Splits into two open paths at the anchor owning `control`.
    pub fn broken_at(&self, control: usize) -> Result<(Self, Self)> {
        let (seg, _) = self.locate(control)?;
        let base = if self.is_closed() {
            self.opened(false)?
        } else {
            self.clone()
        };
        let pivot = base.endpoints()[seg].1;

        let head = base.segments[..=seg].to_vec();
        let mut tail = base.segments[seg + 1..].to_vec();
        let leading_move = tail
            .first()
            .filter(|s| s.starts_subpath())
            .and_then(Segment::end);
        match leading_move {
            Some(to) => tail[0] = Segment::move_to(to),
            None => tail.insert(0, Segment::move_to(pivot)),
        }

        if !head.iter().any(Segment::draws) {
            return Err(EmptyResultError::BreakSide { side: "first" }.into());
        }
        if !tail.iter().any(Segment::draws) {
            return Err(EmptyResultError::BreakSide { side: "second" }.into());
        }
        Ok((
            Self::from_parts(head, Closure::Open, self.style.clone())?,
            Self::from_parts(tail, Closure::Open, self.style.clone())?,
        ))
    }

    /// Subdivides the segment owning `control`; returns the new anchor's index.
    pub fn with_point_added(&self, control: usize) -> Result<(Self, usize)> {
        let (seg, _) = self.locate(control)?;
        let (start, end) = self.endpoints()[seg];
        let (first, second) = self.segments[seg].split(start, end, SUBDIVISION_T)?;
        let anchor = self.control_index(seg, first.control_count() - 1);

        let mut segments = self.segments.clone();
        segments.splice(seg..=seg, [first, second]);
        let path = Self::from_parts(segments, self.closure, self.style.clone())?;
        Ok((path, anchor))
    }

    /// Deletes `control`. `None` means nothing is left of the path.
    pub fn with_point_deleted(&self, control: usize) -> Result<Option<(Self, usize)>> {
        let (seg, local) = self.locate(control)?;
        if self.control_count() == 1 {
            return Ok(None);
        }

        let mut segments = self.segments.clone();
        match segments[seg].without_control(local) {
            Some(replacement) => segments[seg] = replacement,
            None => {
                segments.remove(seg);
                if seg == 0 {
                    match segments.first().and_then(Segment::end) {
                        Some(to) => segments[0] = Segment::move_to(to),
                        None => return Ok(None),
                    }
                }
            }
        }

        let path = Self::from_parts(segments, self.closure, self.style.clone())?;
        let selected = control.min(path.control_count().saturating_sub(1));
        Ok(Some((path, selected)))
    }

    /// Moves `control` to `to`; anchored controls become concrete.
    pub fn with_control_moved(&self, control: usize, to: Point) -> Result<Self> {
        let (seg, local) = self.locate(control)?;
        let mut path = self.clone();
        if let Some(cp) = path.segments[seg].control_mut(local) {
            *cp = ControlPoint::free(to);
        }
        Ok(path)
    }

    /// Makes the handle opposite to `control` continue it through their shared anchor.
    pub fn made_continuous(&self, control: usize, equi: bool) -> Result<Self> {
        let (seg, local) = self.locate(control)?;
        let ends = self.endpoints();
        let (start, end) = ends[seg];

        let (p0, dp, neighbor) = match (&self.segments[seg], local) {
            (Segment::Bezier { c1, .. } | Segment::PartialBezier { c1, .. }, 0) => {
                (start, c1.effective(start), self.incoming_handle(seg))
            }
            (Segment::Bezier { c2, .. } | Segment::PartialBezier { c2, .. }, 1)
            | (Segment::Bezier { c2, .. }, 2) => {
                (end, c2.effective(end), self.outgoing_handle(seg))
            }
            _ => (start, start, None),
        };
        let (n_seg, n_local) = neighbor.ok_or(TopologyError::NoNeighborHandle)?;

        let mut path = self.clone();
        let target = path.segments[n_seg]
            .control_mut(n_local)
            .ok_or(TopologyError::NoNeighborHandle)?;
        let p1 = target.effective(p0);
        *target = ControlPoint::free(reflect_handle(p0, dp, p1, equi));
        Ok(path)
    }

    /// Segment and local index of the handle ending at the start of `seg`.
    fn incoming_handle(&self, seg: usize) -> Option<(usize, usize)> {
        let prev = seg.checked_sub(1)?;
        match &self.segments[prev] {
            Segment::Bezier { .. } => Some((prev, 1)),
            s if s.starts_subpath() && self.is_closed() && prev == self.final_subpath_start() => {
                let last = self.segments.len() - 1;
                matches!(self.segments[last], Segment::PartialBezier { .. }).then_some((last, 1))
            }
            _ => None,
        }
    }

    /// Segment and local index of the handle starting at the end of `seg`.
    fn outgoing_handle(&self, seg: usize) -> Option<(usize, usize)> {
        let next = if self.segments[seg].is_partial() {
            self.final_subpath_start() + 1
        } else {
            seg + 1
        };
        match self.segments.get(next)? {
            Segment::Bezier { .. } | Segment::PartialBezier { .. } => Some((next, 0)),
            _ => None,
        }
    }

    /// Joins paths into one multi-subpath path.
    ///
    /// Closing segments of all but the last path become regular segments. The
    /// first path's style wins.
    pub fn merged(paths: &[PathShape]) -> Result<Self> {
        let (last, init) = paths
            .split_last()
            .filter(|_| paths.len() >= 2)
            .ok_or(EmptyResultError::NothingToMerge { found: paths.len() })?;
        let mut segments = Vec::new();
        for path in init {
            let path = if path.is_closed() {
                path.opened(false)?
            } else {
                path.clone()
            };
            segments.extend(path.segments);
        }
        segments.extend(last.segments.iter().cloned());
        Self::from_parts(segments, last.closure, paths[0].style.clone())
    }

    /// Splits every subpath into its own path.
    ///
    /// A subpath ended by a closing move becomes a path closed with a line. The
    /// final subpath keeps this path's closure.
    pub fn split_subpaths(&self) -> Result<Vec<Self>> {
        if self.subpath_count() < 2 {
            return Err(EmptyResultError::NothingToSplit.into());
        }
        let mut parts = Vec::new();
        let mut current: Vec<Segment> = Vec::new();
        for seg in &self.segments {
            match seg {
                Segment::Move { to } | Segment::ClosingMove { to } if !current.is_empty() => {
                    let closure = if matches!(seg, Segment::ClosingMove { .. }) {
                        current.push(Segment::PartialLine);
                        Closure::Closed {
                            mode: CloseMode::Line,
                            merged_end: None,
                        }
                    } else {
                        Closure::Open
                    };
                    parts.push(Self::from_parts(
                        std::mem::take(&mut current),
                        closure,
                        self.style.clone(),
                    )?);
                    current.push(Segment::Move { to: *to });
                }
                other => current.push(other.clone()),
            }
        }
        parts.push(Self::from_parts(current, self.closure, self.style.clone())?);
        Ok(parts)
    }

    /// Appends a full segment to an open path.
    pub fn push(&mut self, segment: Segment) -> Result<()> {
        if self.is_closed() {
            return Err(TopologyError::AlreadyClosed.into());
        }
        if segment.is_partial() {
            return Err(TopologyError::MisplacedPartial {
                kind: segment.name(),
            }
            .into());
        }
        self.segments.push(segment);
        Ok(())
    }
}

impl Graphical for PathShape {
    fn render(&self) -> lyon::path::Path {
        render_outline(&self.outline())
    }

    fn bounds(&self) -> BBox {
        outline_bounds(&self.outline())
    }

    fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point) {
        for seg in &mut self.segments {
            seg.map_points(f);
        }
        if let Closure::Closed {
            merged_end: Some(end),
            ..
        } = &mut self.closure
        {
            *end = f(*end);
        }
    }
}

/// Resolves each segment's start and end (pen model).
pub(crate) fn resolve(segments: &[Segment]) -> Vec<(Point, Point)> {
    let mut out = Vec::with_capacity(segments.len());
    let mut pen = segments.first().and_then(Segment::end).unwrap_or_default();
    let mut sub_start = pen;
    for seg in segments {
        let start = pen;
        let end = seg.end().unwrap_or(sub_start);
        if seg.starts_subpath() {
            sub_start = end;
        }
        pen = end;
        out.push((start, end));
    }
    out
}

fn validate(segments: &[Segment], closure: &Closure) -> Result<()> {
    match segments.first() {
        None => {
            return Err(TopologyError::NotEnoughSegments {
                required: 1,
                found: 0,
            }
            .into())
        }
        Some(Segment::Move { .. }) => {}
        Some(_) => return Err(TopologyError::FirstSegmentMustBeMove.into()),
    }
    let closed = matches!(closure, Closure::Closed { .. });
    let last = segments.len() - 1;
    for (i, seg) in segments.iter().enumerate() {
        if seg.is_partial() && !(closed && i == last) {
            return Err(TopologyError::MisplacedPartial { kind: seg.name() }.into());
        }
    }
    if closed && !segments[last].is_partial() {
        return Err(TopologyError::MissingClosingSegment.into());
    }
    Ok(())
}
