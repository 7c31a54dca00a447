//! Axis-aligned bounding boxes and resize hotspots.

use serde::{Deserialize, Serialize};

use crate::model::Point;

/// Axis-aligned bounding box in document units.
///
/// [`BBox::EMPTY`] is the identity for [`BBox::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BBox {
    pub const EMPTY: BBox = BBox {
        min: Point::new(f64::INFINITY, f64::INFINITY),
        max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Box spanning two opposite corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Point::new(x1.min(x2), y1.min(y2)),
            max: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut bbox = Self::EMPTY;
        for p in points {
            bbox.include_point(p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }

    pub fn center(&self) -> Point {
        self.min.lerp(self.max, 0.5)
    }

    pub fn include_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.include_point(other.min);
        self.include_point(other.max);
    }

    pub fn union(mut self, other: &BBox) -> BBox {
        self.merge(other);
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        if self.is_empty() {
            return;
        }
        self.min = self.min.translated(dx, dy);
        self.max = self.max.translated(dx, dy);
    }

    /// Scales about `origin`; negative factors flip the box.
    pub fn scale(&mut self, sx: f64, sy: f64, origin: Point) {
        if self.is_empty() {
            return;
        }
        let map = |p: Point| {
            Point::new(
                origin.x + (p.x - origin.x) * sx,
                origin.y + (p.y - origin.y) * sy,
            )
        };
        let (a, b) = (map(self.min), map(self.max));
        *self = BBox::new(a.x, a.y, b.x, b.y);
    }

    pub fn inflate(&self, d: f64) -> BBox {
        if self.is_empty() {
            return *self;
        }
        BBox {
            min: self.min.translated(-d, -d),
            max: self.max.translated(d, d),
        }
    }

    /// Inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn contains_box(&self, other: &BBox) -> bool {
        other.is_empty() || (self.contains(other.min) && self.contains(other.max))
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Finds the resize handle closest to `p` within `tolerance`.
    ///
    /// Corners take precedence over edge midpoints when both are in reach.
    pub fn hotspot_at(&self, p: Point, tolerance: f64) -> Option<Hotspot> {
        if self.is_empty() {
            return None;
        }
        let in_reach = |h: &Hotspot| {
            let at = h.position(self);
            (at.x - p.x).abs() <= tolerance && (at.y - p.y).abs() <= tolerance
        };
        let closest = |candidates: &[Hotspot]| {
            candidates
                .iter()
                .filter(|h| in_reach(h))
                .min_by(|a, b| {
                    let da = a.position(self).distance_to(&p);
                    let db = b.position(self).distance_to(&p);
                    da.total_cmp(&db)
                })
                .copied()
        };
        closest(&Hotspot::CORNERS).or_else(|| closest(&Hotspot::EDGES))
    }

    /// Scale factors and fixed origin that move `hotspot` onto `to` while the
    /// opposite handle stays put.
    pub fn scale_for_handle(&self, hotspot: Hotspot, to: Point) -> (f64, f64, Point) {
        let origin = hotspot.opposite().position(self);
        let from = hotspot.position(self);
        let factor = |target: f64, moved: f64, fixed: f64| {
            let span = moved - fixed;
            if span.abs() < drawkit_core::constants::POINT_EPSILON {
                1.0
            } else {
                (target - fixed) / span
            }
        };
        let sx = if hotspot.moves_x() {
            factor(to.x, from.x, origin.x)
        } else {
            1.0
        };
        let sy = if hotspot.moves_y() {
            factor(to.y, from.y, origin.y)
        } else {
            1.0
        };
        (sx, sy, origin)
    }
}

/// The eight compass resize handles of a box. North is the larger y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hotspot {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Hotspot {
    pub const ALL: [Hotspot; 8] = [
        Hotspot::North,
        Hotspot::NorthEast,
        Hotspot::East,
        Hotspot::SouthEast,
        Hotspot::South,
        Hotspot::SouthWest,
        Hotspot::West,
        Hotspot::NorthWest,
    ];

    const CORNERS: [Hotspot; 4] = [
        Hotspot::NorthEast,
        Hotspot::SouthEast,
        Hotspot::SouthWest,
        Hotspot::NorthWest,
    ];

    const EDGES: [Hotspot; 4] = [Hotspot::North, Hotspot::East, Hotspot::South, Hotspot::West];

    pub fn opposite(self) -> Hotspot {
        match self {
            Hotspot::North => Hotspot::South,
            Hotspot::NorthEast => Hotspot::SouthWest,
            Hotspot::East => Hotspot::West,
            Hotspot::SouthEast => Hotspot::NorthWest,
            Hotspot::South => Hotspot::North,
            Hotspot::SouthWest => Hotspot::NorthEast,
            Hotspot::West => Hotspot::East,
            Hotspot::NorthWest => Hotspot::SouthEast,
        }
    }

    pub fn position(self, bbox: &BBox) -> Point {
        let c = bbox.center();
        match self {
            Hotspot::North => Point::new(c.x, bbox.max.y),
            Hotspot::NorthEast => bbox.max,
            Hotspot::East => Point::new(bbox.max.x, c.y),
            Hotspot::SouthEast => Point::new(bbox.max.x, bbox.min.y),
            Hotspot::South => Point::new(c.x, bbox.min.y),
            Hotspot::SouthWest => bbox.min,
            Hotspot::West => Point::new(bbox.min.x, c.y),
            Hotspot::NorthWest => Point::new(bbox.min.x, bbox.max.y),
        }
    }

    fn moves_x(self) -> bool {
        !matches!(self, Hotspot::North | Hotspot::South)
    }

    fn moves_y(self) -> bool {
        !matches!(self, Hotspot::East | Hotspot::West)
    }
}
