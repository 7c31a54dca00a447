use serde::{Deserialize, Serialize};

use super::{Graphical, Point};
use crate::bbox::BBox;

/// A placed raster image. Pixels stay with the external loader; the editor only
/// tracks placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitmapShape {
    /// South-west corner.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Source reference (file name or resource key).
    pub source: String,
}

impl BitmapShape {
    pub fn new(origin: Point, width: f64, height: f64, source: impl Into<String>) -> Self {
        Self {
            origin,
            width,
            height,
            source: source.into(),
        }
    }
}

impl Graphical for BitmapShape {
    fn render(&self) -> lyon::path::Path {
        let b = self.bounds();
        let mut builder = lyon::path::Path::builder();
        builder.begin(b.min.to_render());
        builder.line_to(Point::new(b.max.x, b.min.y).to_render());
        builder.line_to(b.max.to_render());
        builder.line_to(Point::new(b.min.x, b.max.y).to_render());
        builder.end(true);
        builder.build()
    }

    fn bounds(&self) -> BBox {
        BBox::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }

    fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point) {
        let a = f(self.origin);
        let b = f(Point::new(self.origin.x + self.width, self.origin.y + self.height));
        let mapped = BBox::new(a.x, a.y, b.x, b.y);
        self.origin = mapped.min;
        self.width = mapped.width();
        self.height = mapped.height();
    }
}
