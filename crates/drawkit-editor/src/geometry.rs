//! Pure geometric helpers used by the path operations.

use drawkit_core::constants::POINT_EPSILON;

use crate::model::Point;

/// Reflects the moved handle `dp` through the anchor `p0` and returns the new
/// position of the opposite handle `p1`.
///
/// The direction always comes from `dp`. With `equi` the distance is `|p0 - dp|`,
/// otherwise `p1` keeps its own distance from the anchor.
pub fn reflect_handle(p0: Point, dp: Point, p1: Point, equi: bool) -> Point {
    let theta = (p0.y - dp.y).atan2(p0.x - dp.x);
    let r = if equi {
        p0.distance_to(&dp)
    } else {
        p0.distance_to(&p1)
    };
    Point::new(p0.x + r * theta.cos(), p0.y + r * theta.sin())
}

/// Mirrors `p` about the infinite line through `a` and `b`.
///
/// A degenerate line leaves the point unchanged.
pub fn mirror_point(p: Point, a: Point, b: Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 < POINT_EPSILON {
        return p;
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    let foot = Point::new(a.x + t * dx, a.y + t * dy);
    Point::new(2.0 * foot.x - p.x, 2.0 * foot.y - p.y)
}

/// Bilinear interpolation over a quad given as `[sw, se, ne, nw]`.
pub fn bilinear(corners: &[Point; 4], u: f64, v: f64) -> Point {
    let [sw, se, ne, nw] = *corners;
    let bottom = sw.lerp(se, u);
    let top = nw.lerp(ne, u);
    bottom.lerp(top, v)
}

/// Point at `fraction` of the chord from `from` to `to`.
pub fn along_chord(from: Point, to: Point, fraction: f64) -> Point {
    from.lerp(to, fraction)
}
