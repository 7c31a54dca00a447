//! Path segments.
//!
//! A segment stores only the points it owns; its start is the end of the
//! previous segment. Partial segments have no stored end: the structure that
//! holds them supplies it (subpath start, symmetry axis, ...).

use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use drawkit_core::constants::HANDLE_CHORD_FRACTION;
use drawkit_core::{EmptyResultError, Result, TopologyError};

use super::{ControlPoint, Point};
use crate::bbox::BBox;
use crate::geometry::along_chord;

const ELEVATION: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Move,
    Line,
    Bezier,
    PartialLine,
    PartialBezier,
    PartialSegment,
    ClosingMove,
}

impl SegmentKind {
    pub fn name(self) -> &'static str {
        match self {
            SegmentKind::Move => "move",
            SegmentKind::Line => "line",
            SegmentKind::Bezier => "bezier",
            SegmentKind::PartialLine => "partial line",
            SegmentKind::PartialBezier => "partial bezier",
            SegmentKind::PartialSegment => "partial segment",
            SegmentKind::ClosingMove => "closing move",
        }
    }
}

/// Requested segment kind for the conversion operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conversion {
    ToLine,
    ToBezier,
    ToMove,
    ToClosingMove,
}

impl Conversion {
    pub fn name(self) -> &'static str {
        match self {
            Conversion::ToLine => "line",
            Conversion::ToBezier => "bezier",
            Conversion::ToMove => "move",
            Conversion::ToClosingMove => "closing move",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Move {
        to: ControlPoint,
    },
    Line {
        to: ControlPoint,
    },
    Bezier {
        c1: ControlPoint,
        c2: ControlPoint,
        to: ControlPoint,
    },
    PartialLine,
    PartialBezier {
        c1: ControlPoint,
        c2: ControlPoint,
    },
    /// Quadratic partial with one shared control.
    PartialSegment {
        ctrl: ControlPoint,
    },
    /// Closes the current subpath with a straight line, then starts a new one at `to`.
    ClosingMove {
        to: ControlPoint,
    },
}

impl Segment {
    pub fn move_to(p: Point) -> Self {
        Segment::Move { to: p.into() }
    }

    pub fn line_to(p: Point) -> Self {
        Segment::Line { to: p.into() }
    }

    pub fn bezier(c1: Point, c2: Point, to: Point) -> Self {
        Segment::Bezier {
            c1: c1.into(),
            c2: c2.into(),
            to: to.into(),
        }
    }

    pub fn closing_move(p: Point) -> Self {
        Segment::ClosingMove { to: p.into() }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Move { .. } => SegmentKind::Move,
            Segment::Line { .. } => SegmentKind::Line,
            Segment::Bezier { .. } => SegmentKind::Bezier,
            Segment::PartialLine => SegmentKind::PartialLine,
            Segment::PartialBezier { .. } => SegmentKind::PartialBezier,
            Segment::PartialSegment { .. } => SegmentKind::PartialSegment,
            Segment::ClosingMove { .. } => SegmentKind::ClosingMove,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Segment::PartialLine | Segment::PartialBezier { .. } | Segment::PartialSegment { .. }
        )
    }

    /// Move or closing move: starts a new subpath.
    pub fn starts_subpath(&self) -> bool {
        matches!(self, Segment::Move { .. } | Segment::ClosingMove { .. })
    }

    /// Draws a visible piece from its start to its end.
    pub fn draws(&self) -> bool {
        !self.starts_subpath()
    }

    /// Explicit end point, `None` for partials.
    pub fn end(&self) -> Option<Point> {
        match self {
            Segment::Move { to }
            | Segment::Line { to }
            | Segment::Bezier { to, .. }
            | Segment::ClosingMove { to } => Some(to.pos),
            _ => None,
        }
    }

    /// Controls in flat order.
    pub fn controls(&self) -> SmallVec<[ControlPoint; 3]> {
        match self {
            Segment::Move { to } | Segment::Line { to } | Segment::ClosingMove { to } => {
                smallvec![*to]
            }
            Segment::Bezier { c1, c2, to } => smallvec![*c1, *c2, *to],
            Segment::PartialLine => SmallVec::new(),
            Segment::PartialBezier { c1, c2 } => smallvec![*c1, *c2],
            Segment::PartialSegment { ctrl } => smallvec![*ctrl],
        }
    }

    pub fn control_count(&self) -> usize {
        match self {
            Segment::PartialLine => 0,
            Segment::Bezier { .. } => 3,
            Segment::PartialBezier { .. } => 2,
            _ => 1,
        }
    }

    pub fn control_mut(&mut self, local: usize) -> Option<&mut ControlPoint> {
        match (self, local) {
            (Segment::Move { to }, 0)
            | (Segment::Line { to }, 0)
            | (Segment::ClosingMove { to }, 0)
            | (Segment::Bezier { to, .. }, 2) => Some(to),
            (Segment::Bezier { c1, .. }, 0) | (Segment::PartialBezier { c1, .. }, 0) => Some(c1),
            (Segment::Bezier { c2, .. }, 1) | (Segment::PartialBezier { c2, .. }, 1) => Some(c2),
            (Segment::PartialSegment { ctrl }, 0) => Some(ctrl),
            _ => None,
        }
    }

    /// True when `local` addresses the segment's end anchor.
    pub fn is_anchor(&self, local: usize) -> bool {
        match self {
            Segment::Bezier { .. } => local == 2,
            Segment::Move { .. } | Segment::Line { .. } | Segment::ClosingMove { .. } => local == 0,
            _ => false,
        }
    }

    pub fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point) {
        match self {
            Segment::Move { to } | Segment::Line { to } | Segment::ClosingMove { to } => {
                to.pos = f(to.pos);
            }
            Segment::Bezier { c1, c2, to } => {
                c1.pos = f(c1.pos);
                c2.pos = f(c2.pos);
                to.pos = f(to.pos);
            }
            Segment::PartialLine => {}
            Segment::PartialBezier { c1, c2 } => {
                c1.pos = f(c1.pos);
                c2.pos = f(c2.pos);
            }
            Segment::PartialSegment { ctrl } => ctrl.pos = f(ctrl.pos),
        }
    }

    /// Drawn piece between `start` and `end`; `None` for moves.
    ///
    /// `end` is only consulted for partials.
    pub fn piece(&self, start: Point, end: Point) -> Option<Piece> {
        match self {
            Segment::Move { .. } | Segment::ClosingMove { .. } => None,
            Segment::Line { to } => Some(Piece::Line {
                from: start,
                to: to.pos,
            }),
            Segment::Bezier { c1, c2, to } => Some(Piece::Cubic {
                from: start,
                c1: c1.effective(start),
                c2: c2.effective(to.pos),
                to: to.pos,
            }),
            Segment::PartialLine => Some(Piece::Line { from: start, to: end }),
            Segment::PartialBezier { c1, c2 } => Some(Piece::Cubic {
                from: start,
                c1: c1.effective(start),
                c2: c2.effective(end),
                to: end,
            }),
            Segment::PartialSegment { ctrl } => Some(Piece::Quad {
                from: start,
                ctrl: ctrl.pos,
                to: end,
            }),
        }
    }

    /// Full segment equivalent of a partial, ending at `end`.
    pub fn completed(&self, start: Point, end: Point) -> Segment {
        match self {
            Segment::PartialLine => Segment::line_to(end),
            Segment::PartialBezier { c1, c2 } => Segment::Bezier {
                c1: *c1,
                c2: *c2,
                to: end.into(),
            },
            Segment::PartialSegment { ctrl } => Segment::bezier(
                start.lerp(ctrl.pos, ELEVATION),
                end.lerp(ctrl.pos, ELEVATION),
                end,
            ),
            full => full.clone(),
        }
    }

    /// Partial form of a drawing segment, dropping its end.
    pub fn demoted(&self) -> Result<Segment> {
        match self {
            Segment::Line { .. } => Ok(Segment::PartialLine),
            Segment::Bezier { c1, c2, .. } => Ok(Segment::PartialBezier { c1: *c1, c2: *c2 }),
            partial if partial.is_partial() => Ok(partial.clone()),
            other => Err(TopologyError::IllegalConversion {
                from: other.name(),
                to: "partial",
            }
            .into()),
        }
    }

    /// Converts to another kind at the same position.
    ///
    /// `start` and `end` are the resolved endpoints of the segment. Restrictions
    /// that depend on the position in a path are checked by the caller.
    pub fn converted(&self, conversion: Conversion, start: Point, end: Point) -> Result<Segment> {
        let illegal = || -> drawkit_core::Error {
            TopologyError::IllegalConversion {
                from: self.name(),
                to: conversion.name(),
            }
            .into()
        };
        let chord_handles = || {
            (
                along_chord(start, end, HANDLE_CHORD_FRACTION),
                along_chord(start, end, 1.0 - HANDLE_CHORD_FRACTION),
            )
        };

        let converted = match (conversion, self) {
            (Conversion::ToLine, Segment::Line { .. } | Segment::PartialLine)
            | (Conversion::ToBezier, Segment::Bezier { .. } | Segment::PartialBezier { .. })
            | (Conversion::ToMove, Segment::Move { .. })
            | (Conversion::ToClosingMove, Segment::ClosingMove { .. }) => {
                return Err(EmptyResultError::NoChange.into())
            }

            (Conversion::ToMove | Conversion::ToClosingMove, partial) if partial.is_partial() => {
                return Err(illegal())
            }

            (Conversion::ToLine, Segment::PartialBezier { .. } | Segment::PartialSegment { .. }) => {
                Segment::PartialLine
            }
            (Conversion::ToBezier, Segment::PartialLine) => {
                let (c1, c2) = chord_handles();
                Segment::PartialBezier {
                    c1: c1.into(),
                    c2: c2.into(),
                }
            }
            (Conversion::ToBezier, Segment::PartialSegment { ctrl }) => Segment::PartialBezier {
                c1: start.lerp(ctrl.pos, ELEVATION).into(),
                c2: end.lerp(ctrl.pos, ELEVATION).into(),
            },

            (conversion, full) => {
                let to = full.end().ok_or_else(illegal)?;
                match conversion {
                    Conversion::ToLine => Segment::line_to(to),
                    Conversion::ToBezier => {
                        let (c1, c2) = chord_handles();
                        Segment::bezier(c1, c2, to)
                    }
                    Conversion::ToMove => Segment::move_to(to),
                    Conversion::ToClosingMove => Segment::closing_move(to),
                }
            }
        };
        Ok(converted)
    }

    /// Segment left after deleting control `local`; `None` removes the segment.
    pub fn without_control(&self, local: usize) -> Option<Segment> {
        match self {
            Segment::Bezier { c1, c2, to } if local < 2 => {
                let (mut c1, mut c2) = (*c1, *c2);
                if local == 0 {
                    c1.anchored = true;
                } else {
                    c2.anchored = true;
                }
                if c1.anchored && c2.anchored {
                    Some(Segment::Line { to: *to })
                } else {
                    Some(Segment::Bezier { c1, c2, to: *to })
                }
            }
            Segment::PartialBezier { c1, c2 } => Some(Segment::PartialSegment {
                ctrl: if local == 0 { *c2 } else { *c1 },
            }),
            Segment::PartialSegment { .. } => Some(Segment::PartialLine),
            Segment::PartialLine => Some(Segment::PartialLine),
            _ => None,
        }
    }

    /// Subdivides at `t`; the first half always ends in a new explicit anchor.
    pub fn split(&self, start: Point, end: Point, t: f64) -> Result<(Segment, Segment)> {
        let piece = self.piece(start, end).ok_or(TopologyError::NotSubdividable {
            kind: self.name(),
        })?;
        let (a, b) = piece.split(t);
        let second = if self.is_partial() {
            b.to_partial()
        } else {
            b.to_segment()
        };
        Ok((a.to_segment(), second))
    }
}

/// A resolved, absolutely positioned drawing piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Piece {
    Line { from: Point, to: Point },
    Quad { from: Point, ctrl: Point, to: Point },
    Cubic { from: Point, c1: Point, c2: Point, to: Point },
}

impl Piece {
    pub fn from(&self) -> Point {
        match self {
            Piece::Line { from, .. } | Piece::Quad { from, .. } | Piece::Cubic { from, .. } => *from,
        }
    }

    pub fn to(&self) -> Point {
        match self {
            Piece::Line { to, .. } | Piece::Quad { to, .. } | Piece::Cubic { to, .. } => *to,
        }
    }

    pub fn reversed(&self) -> Piece {
        match *self {
            Piece::Line { from, to } => Piece::Line { from: to, to: from },
            Piece::Quad { from, ctrl, to } => Piece::Quad {
                from: to,
                ctrl,
                to: from,
            },
            Piece::Cubic { from, c1, c2, to } => Piece::Cubic {
                from: to,
                c1: c2,
                c2: c1,
                to: from,
            },
        }
    }

    pub fn mapped(&self, f: impl Fn(Point) -> Point) -> Piece {
        match *self {
            Piece::Line { from, to } => Piece::Line {
                from: f(from),
                to: f(to),
            },
            Piece::Quad { from, ctrl, to } => Piece::Quad {
                from: f(from),
                ctrl: f(ctrl),
                to: f(to),
            },
            Piece::Cubic { from, c1, c2, to } => Piece::Cubic {
                from: f(from),
                c1: f(c1),
                c2: f(c2),
                to: f(to),
            },
        }
    }

    pub fn bounds(&self) -> BBox {
        match *self {
            Piece::Line { from, to } => BBox::from_points([from, to]),
            Piece::Quad { from, ctrl, to } => {
                let b = QuadraticBezierSegment {
                    from: from.to_lyon(),
                    ctrl: ctrl.to_lyon(),
                    to: to.to_lyon(),
                }
                .bounding_box();
                BBox::new(b.min.x, b.min.y, b.max.x, b.max.y)
            }
            Piece::Cubic { from, c1, c2, to } => {
                let b = cubic(from, c1, c2, to).bounding_box();
                BBox::new(b.min.x, b.min.y, b.max.x, b.max.y)
            }
        }
    }

    pub fn split(&self, t: f64) -> (Piece, Piece) {
        match *self {
            Piece::Line { from, to } => {
                let mid = from.lerp(to, t);
                (Piece::Line { from, to: mid }, Piece::Line { from: mid, to })
            }
            Piece::Quad { from, ctrl, to } => {
                let (a, b) = QuadraticBezierSegment {
                    from: from.to_lyon(),
                    ctrl: ctrl.to_lyon(),
                    to: to.to_lyon(),
                }
                .split(t);
                let quad = |s: QuadraticBezierSegment<f64>| Piece::Quad {
                    from: Point::from_lyon(s.from),
                    ctrl: Point::from_lyon(s.ctrl),
                    to: Point::from_lyon(s.to),
                };
                (quad(a), quad(b))
            }
            Piece::Cubic { from, c1, c2, to } => {
                let (a, b) = cubic(from, c1, c2, to).split(t);
                let piece = |s: CubicBezierSegment<f64>| Piece::Cubic {
                    from: Point::from_lyon(s.from),
                    c1: Point::from_lyon(s.ctrl1),
                    c2: Point::from_lyon(s.ctrl2),
                    to: Point::from_lyon(s.to),
                };
                (piece(a), piece(b))
            }
        }
    }

    /// Full segment drawing this piece; quadratics are degree-elevated.
    pub fn to_segment(&self) -> Segment {
        match *self {
            Piece::Line { to, .. } => Segment::line_to(to),
            Piece::Quad { from, ctrl, to } => {
                Segment::bezier(from.lerp(ctrl, ELEVATION), to.lerp(ctrl, ELEVATION), to)
            }
            Piece::Cubic { c1, c2, to, .. } => Segment::bezier(c1, c2, to),
        }
    }

    /// Partial segment drawing this piece up to an implicit end.
    pub fn to_partial(&self) -> Segment {
        match *self {
            Piece::Line { .. } => Segment::PartialLine,
            Piece::Quad { ctrl, .. } => Segment::PartialSegment { ctrl: ctrl.into() },
            Piece::Cubic { c1, c2, .. } => Segment::PartialBezier {
                c1: c1.into(),
                c2: c2.into(),
            },
        }
    }

    pub(crate) fn append_to(&self, builder: &mut lyon::path::path::Builder) {
        match *self {
            Piece::Line { to, .. } => {
                builder.line_to(to.to_render());
            }
            Piece::Quad { ctrl, to, .. } => {
                builder.quadratic_bezier_to(ctrl.to_render(), to.to_render());
            }
            Piece::Cubic { c1, c2, to, .. } => {
                builder.cubic_bezier_to(c1.to_render(), c2.to_render(), to.to_render());
            }
        }
    }
}

fn cubic(from: Point, c1: Point, c2: Point, to: Point) -> CubicBezierSegment<f64> {
    CubicBezierSegment {
        from: from.to_lyon(),
        ctrl1: c1.to_lyon(),
        ctrl2: c2.to_lyon(),
        to: to.to_lyon(),
    }
}

/// One subpath of a resolved outline.
#[derive(Debug, Clone, PartialEq)]
pub struct SubOutline {
    pub start: Point,
    pub pieces: Vec<Piece>,
    pub closed: bool,
}

impl SubOutline {
    pub fn bounds(&self) -> BBox {
        let mut bbox = BBox::from_points([self.start]);
        for piece in &self.pieces {
            bbox.merge(&piece.bounds());
        }
        bbox
    }
}

/// Renders resolved subpaths into a `lyon` path.
pub(crate) fn render_outline(outline: &[SubOutline]) -> lyon::path::Path {
    let mut builder = lyon::path::Path::builder();
    for sub in outline {
        builder.begin(sub.start.to_render());
        for piece in &sub.pieces {
            piece.append_to(&mut builder);
        }
        builder.end(sub.closed);
    }
    builder.build()
}

pub(crate) fn outline_bounds(outline: &[SubOutline]) -> BBox {
    outline
        .iter()
        .fold(BBox::EMPTY, |acc, sub| acc.union(&sub.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_handle_deletion_degenerates_to_line() {
        let seg = Segment::bezier(Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(3.0, 0.0));
        let once = seg.without_control(0).unwrap();
        assert_eq!(once.kind(), SegmentKind::Bezier);
        let twice = once.without_control(1).unwrap();
        assert_eq!(twice, Segment::line_to(Point::new(3.0, 0.0)));
    }

    #[test]
    fn test_partial_degeneration_chain() {
        let seg = Segment::PartialBezier {
            c1: Point::new(1.0, 0.0).into(),
            c2: Point::new(2.0, 0.0).into(),
        };
        let quad = seg.without_control(0).unwrap();
        assert_eq!(
            quad,
            Segment::PartialSegment {
                ctrl: Point::new(2.0, 0.0).into()
            }
        );
        assert_eq!(quad.without_control(0).unwrap(), Segment::PartialLine);
    }

    #[test]
    fn test_chord_handles() {
        let seg = Segment::line_to(Point::new(3.0, 0.0));
        let bez = seg
            .converted(Conversion::ToBezier, Point::new(0.0, 0.0), Point::new(3.0, 0.0))
            .unwrap();
        let c = bez.controls();
        assert!((c[0].pos.x - 1.0).abs() < 1e-12);
        assert!((c[1].pos.x - 2.0).abs() < 1e-12);
    }
}
