//! Engine-wide constants.

/// Distance (storage units) under which two points are treated as coincident.
pub const POINT_EPSILON: f64 = 1e-9;

/// Default pick tolerance around object bounding boxes (storage units).
pub const DEFAULT_HIT_TOLERANCE: f64 = 2.0;

/// Default distance within which a resize handle is picked (storage units).
pub const DEFAULT_HOTSPOT_TOLERANCE: f64 = 3.0;

/// Default number of entries kept on the undo stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Parameter at which `add_point` subdivides a segment.
pub const SUBDIVISION_T: f64 = 0.5;

/// Fraction of the chord used for handles created by line-to-curve conversion.
pub const HANDLE_CHORD_FRACTION: f64 = 1.0 / 3.0;

/// Default stroke width (storage units).
pub const DEFAULT_STROKE_WIDTH: f64 = 0.4;

/// Default font size (points).
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Flattening tolerance used when rendering curves into display lists.
pub const RENDER_TOLERANCE: f32 = 0.05;
