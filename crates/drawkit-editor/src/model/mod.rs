//! Drawable shape model.
//!
//! Every shape kind stores its geometry in document (storage) units with the y axis
//! pointing up. Shapes render to `lyon` paths and report their bounding boxes
//! through the [`Graphical`] trait.

use lyon::geom::{vector, Transform};
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::bbox::BBox;

mod bitmap;
mod path;
mod segment;
mod style;
mod symmetric;
mod text;

pub use bitmap::BitmapShape;
pub use path::{CloseMode, Closure, PathShape};
pub use segment::{Conversion, Piece, Segment, SegmentKind, SubOutline};
pub use style::{Font, Paint, Style, StyleDefaults};
pub use symmetric::{SymmetricPart, SymmetricPath};
pub use text::{ApproxTextMeasure, TextExtent, TextMeasure, TextShape};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn to_lyon(self) -> lyon::geom::Point<f64> {
        lyon::geom::point(self.x, self.y)
    }

    pub fn from_lyon(p: lyon::geom::Point<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    /// Single precision point for display lists.
    pub fn to_render(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }
}

/// A point owned by a segment.
///
/// An anchored control is implicit: it sits on its neighbouring anchor point
/// and becomes concrete as soon as it is moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub pos: Point,
    #[serde(default)]
    pub anchored: bool,
}

impl ControlPoint {
    pub const fn free(pos: Point) -> Self {
        Self {
            pos,
            anchored: false,
        }
    }

    pub const fn anchored(pos: Point) -> Self {
        Self {
            pos,
            anchored: true,
        }
    }

    /// Position as drawn: anchored controls collapse onto `anchor`.
    pub fn effective(&self, anchor: Point) -> Point {
        if self.anchored {
            anchor
        } else {
            self.pos
        }
    }
}

impl From<Point> for ControlPoint {
    fn from(pos: Point) -> Self {
        ControlPoint::free(pos)
    }
}

/// Behaviour shared by every drawable shape.
pub trait Graphical {
    /// Outline in document space.
    fn render(&self) -> Path;

    fn bounds(&self) -> BBox;

    /// Maps every stored point through `f`.
    fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point);

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance).contains(p)
    }

    fn transform(&mut self, t: &Transform<f64>) {
        self.map_points(&mut |p| Point::from_lyon(t.transform_point(p.to_lyon())));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let t = Transform::translation(dx, dy);
        self.transform(&t);
    }

    fn scale(&mut self, sx: f64, sy: f64, center: Point) {
        // Translate to origin, scale, then translate back to keep the pivot fixed.
        let t = Transform::translation(-center.x, -center.y)
            .then_scale(sx, sy)
            .then_translate(vector(center.x, center.y));
        self.transform(&t);
    }
}
