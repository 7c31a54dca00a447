//! World/view transforms.
//!
//! View space has its origin at the top-left corner of the canvas with y growing
//! downwards; document space is y-up. Dirty regions are handed to the renderer
//! in document space and translated here.

use std::fmt;

use crate::bbox::BBox;
use crate::model::Point;

const MIN_ZOOM: f64 = 0.01;
const MAX_ZOOM: f64 = 100.0;
const ZOOM_STEP: f64 = 1.2;

/// Zoom, pan and canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

/// Exact identity of a viewport, used to key cached display lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportKey([u64; 5]);

impl Viewport {
    /// Creates a viewport at 1:1 zoom with no pan.
    ///
    /// # Arguments
    ///
    /// * `canvas_width` - Canvas width in pixels
    /// * `canvas_height` - Canvas height in pixels
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    /// Current zoom factor (view pixels per storage unit).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in view pixels.
    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    /// Canvas dimensions in pixels.
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// Updates the canvas size after a resize. Zoom and pan are kept.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Out-of-range zoom levels are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            self.zoom = zoom;
        }
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Sets the pan offset in view pixels.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta in view pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Document point to view pixel.
    ///
    /// ```text
    /// view_x = x * zoom + pan_x
    /// view_y = canvas_height - (y * zoom + pan_y)
    /// ```
    pub fn world_to_view(&self, p: Point) -> Point {
        Point::new(
            p.x * self.zoom + self.pan_x,
            self.canvas_height - (p.y * self.zoom + self.pan_y),
        )
    }

    /// View pixel to document point.
    pub fn view_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.pan_x) / self.zoom,
            (self.canvas_height - p.y - self.pan_y) / self.zoom,
        )
    }

    /// Document box to view box. The y flip swaps which corner is the minimum.
    pub fn world_to_view_bbox(&self, bbox: &BBox) -> BBox {
        if bbox.is_empty() {
            return BBox::EMPTY;
        }
        BBox::from_points([self.world_to_view(bbox.min), self.world_to_view(bbox.max)])
    }

    /// Visible document region.
    pub fn visible_world(&self) -> BBox {
        BBox::from_points([
            self.view_to_world(Point::new(0.0, 0.0)),
            self.view_to_world(Point::new(self.canvas_width, self.canvas_height)),
        ])
    }

    /// Zooms and pans so that `bounds` fills the canvas minus `padding` (a
    /// fraction of each side).
    pub fn fit_to_bounds(&mut self, bounds: &BBox, padding: f64) {
        let (w, h) = (bounds.width(), bounds.height());
        if bounds.is_empty() || w <= 0.0 || h <= 0.0 {
            return;
        }
        let usable = 1.0 - 2.0 * padding;
        let zoom = (self.canvas_width * usable / w)
            .min(self.canvas_height * usable / h)
            .clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom = zoom;
        self.center_on(bounds.center());
    }

    /// Changes the zoom while keeping `anchor` at the same view position.
    pub fn zoom_to_point(&mut self, anchor: Point, zoom: f64) {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return;
        }
        let fixed = self.world_to_view(anchor);
        self.zoom = zoom;
        self.pan_x = fixed.x - anchor.x * zoom;
        self.pan_y = self.canvas_height - fixed.y - anchor.y * zoom;
    }

    /// Pans so that document point `p` sits at the canvas centre.
    pub fn center_on(&mut self, p: Point) {
        self.pan_x = self.canvas_width / 2.0 - p.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - p.y * self.zoom;
    }

    /// Bitwise identity of zoom, pan and canvas size.
    pub fn key(&self) -> ViewportKey {
        ViewportKey([
            self.zoom.to_bits(),
            self.pan_x.to_bits(),
            self.pan_y.to_bits(),
            self.canvas_width.to_bits(),
            self.canvas_height.to_bits(),
        ])
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_round_trip() {
        let mut vp = Viewport::new(400.0, 300.0);
        vp.set_zoom(2.0);
        vp.set_pan(10.0, 20.0);
        let p = Point::new(12.5, -3.0);
        let back = vp.view_to_world(vp.world_to_view(p));
        assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_flips_y() {
        let vp = Viewport::new(100.0, 100.0);
        let view = vp.world_to_view_bbox(&BBox::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(view, BBox::new(0.0, 80.0, 10.0, 100.0));
    }

    #[test]
    fn test_zoom_to_point_keeps_anchor() {
        let mut vp = Viewport::new(100.0, 100.0);
        let anchor = Point::new(30.0, 40.0);
        let before = vp.world_to_view(anchor);
        vp.zoom_to_point(anchor, 3.0);
        let after = vp.world_to_view(anchor);
        assert!(before.distance_to(&after) < 1e-9);
        assert_ne!(vp.key(), Viewport::new(100.0, 100.0).key());
    }
}
