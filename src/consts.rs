//! Shared numeric constants for the effects crate.

// ── Reference canvas ────────────────────────────────────────────

/// Width of the reference canvas all velocity scaling is relative to.
pub const REFERENCE_WIDTH: f64 = 720.0;

/// Height of the reference canvas; also scales the gravity term.
pub const REFERENCE_HEIGHT: f64 = 480.0;

// ── Geometry ────────────────────────────────────────────────────

/// Lower bound of the random angular weight drawn per radial direction.
pub const ANGLE_WEIGHT_BASE: f64 = 2.0;

/// Width of the random angular weight band above [`ANGLE_WEIGHT_BASE`].
pub const ANGLE_WEIGHT_DELTA: f64 = 7.0;

/// Slope substituted for near-vertical radial directions to avoid division
/// blow-ups when clipping against the rectangle boundary.
pub const SLOPE_CLAMP: f64 = 100_000.0;

/// Below this |x| a direction is treated as vertical.
pub const NEAR_VERTICAL: f64 = 1e-4;

/// Fraction of the center-to-boundary length the shard rings reach for.
pub const EDGE_REACH: f64 = 0.95;

/// Relative weights of the ring subdivisions along each radial edge
/// (~43% / 57% before jitter).
pub const EDGE_WEIGHTS: [f64; 2] = [3.0, 4.0];

/// Tolerance for deciding an endpoint lies on a rectangle side when
/// building the corner triangles.
pub const CORNER_TOLERANCE: f64 = 1e-9;

// ── Triggers ────────────────────────────────────────────────────

/// Fixed visibility band: an element triggers once its top edge is within
/// this many pixels inside the viewport bottom and not past the top by more.
pub const VISIBILITY_BAND_PX: f64 = 100.0;

/// Attribute used as the armed/played flag on trigger targets.
pub const ARMED_ATTR: &str = "data-anim";

/// Attribute carrying the session registry key assigned to a target.
pub const TARGET_KEY_ATTR: &str = "data-shatter-key";

// ── Defaults ────────────────────────────────────────────────────

/// Default radial shard divisor. Values below 8 produce a coarse shatter;
/// below [`MIN_VECTORS`] the tessellation degenerates.
pub const DEFAULT_VECTORS_COUNT: u32 = 12;

/// Minimum accepted shard divisor. Geometry below this self-overlaps.
pub const MIN_VECTORS: u32 = 3;

/// Default bound on the replacement-image preload, in milliseconds.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Default pause between a scroll trigger and the shatter start.
pub const DEFAULT_TRIGGER_DELAY_MS: u64 = 1_000;

/// Default per-character reveal speed for the text effects.
pub const DEFAULT_TEXT_SPEED_MS: u64 = 500;

/// Default start delay for the text effects.
pub const DEFAULT_TEXT_DELAY_MS: u64 = 100;
