//! Kinematics: per-shard motion state derived from ring depth.
//!
//! Shards nearest the center move first and fastest; outer rings lag and
//! drift. The three-tier policy below is deliberately rough — the effect
//! only has to look like glass letting go, not simulate it.

#[cfg(test)]
#[path = "kinetics_test.rs"]
mod kinetics_test;

use rand::Rng;

use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::geom::{Polygon, Size, Vec2};

/// 3D rotation axis for the CSS `rotate3d` transform. The in-plane part is
/// the perpendicular of the shard's outward direction; `z` controls how much
/// the shard tumbles out of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAxis {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Mutable kinematic state of one shard, advanced every animation frame once
/// the start delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardMotion {
    /// Rotation pivot: the vertex mean of the shard's outline.
    pub centroid: Vec2,
    /// Current offset from the shard's resting position, in pixels.
    pub offset: Vec2,
    /// Per-frame translation; the initial offset equals this, so a shard
    /// sits slightly displaced toward its travel direction while waiting.
    pub velocity: Vec2,
    /// Accumulated rotation angle in radians.
    pub rotation: f64,
    /// Rotation advance per frame, in radians.
    pub spin: f64,
    /// Axis of the `rotate3d` tumble.
    pub axis: RotationAxis,
    /// Frames to wait before this shard starts moving.
    pub delay: u32,
}

impl ShardMotion {
    /// CSS transform for the current rotation state.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "rotate3d({}, {}, {}, {}rad)",
            self.axis.x, self.axis.y, self.axis.z, self.rotation
        )
    }

    /// CSS `transform-origin` anchoring the tumble at the centroid.
    #[must_use]
    pub fn transform_origin_css(&self) -> String {
        format!("{}px {}px", self.centroid.x, self.centroid.y)
    }
}

/// One shard: its outline plus its motion state.
#[derive(Debug, Clone, PartialEq)]
pub struct Shard {
    pub polygon: Polygon,
    pub motion: ShardMotion,
}

/// Velocity multiplier band by ring depth (innermost first).
fn velocity_band(depth: usize) -> (f64, f64) {
    match depth {
        0 => (5.0, 10.0),
        1 => (3.0, 5.0),
        _ => (1.0, 2.0),
    }
}

/// Start-delay band in frames by ring depth.
fn delay_band(depth: usize) -> (u32, u32) {
    match depth {
        0 => (1, 5),
        1 => (8, 10),
        _ => (5, 15),
    }
}

/// Angular speed band in degrees per frame by ring depth.
fn spin_band(depth: usize) -> (f64, f64) {
    match depth {
        0 => (5.0, 15.0),
        1 => (2.0, 3.0),
        _ => (1.0, 2.0),
    }
}

/// Out-of-plane tumble intensity band by ring depth.
fn tumble_band(depth: usize) -> (f64, f64) {
    match depth {
        0 => (0.1, 0.2),
        1 => (0.05, 0.1),
        _ => (0.025, 0.05),
    }
}

/// Annotate every polygon with its motion state, consuming the rings.
///
/// Velocities scale with the rectangle relative to the 720×480 reference
/// canvas and with the caller's `velocity_rate`. `legacy_center_skew`
/// reproduces the original implementation's direction bias, which centered
/// the Y component against the X center; leave it off unless matching
/// legacy visuals bit-for-bit.
#[must_use]
pub fn build_shards(
    size: Size,
    groups: Vec<Vec<Polygon>>,
    velocity_rate: f64,
    legacy_center_skew: bool,
    rng: &mut impl Rng,
) -> Vec<Vec<Shard>> {
    let center = size.center();
    let x_rate = size.width / REFERENCE_WIDTH;
    let y_rate = size.height / REFERENCE_HEIGHT;

    groups
        .into_iter()
        .enumerate()
        .map(|(depth, ring)| {
            ring.into_iter()
                .map(|polygon| {
                    let centroid = polygon.centroid();
                    let center_y = if legacy_center_skew { center.x } else { center.y };
                    let dir =
                        Vec2::new(centroid.x - center.x, centroid.y - center_y).normalized();

                    let (v_lo, v_hi) = velocity_band(depth);
                    let velocity = Vec2::new(
                        velocity_rate * x_rate * rng.random_range(v_lo..v_hi) * dir.x,
                        velocity_rate * y_rate * rng.random_range(v_lo..v_hi) * dir.y,
                    );

                    let (d_lo, d_hi) = delay_band(depth);
                    let delay = rng.random_range(d_lo..=d_hi);

                    let (s_lo, s_hi) = spin_band(depth);
                    let spin = rng.random_range(s_lo..s_hi).to_radians();

                    let (t_lo, t_hi) = tumble_band(depth);
                    let axis = RotationAxis {
                        x: dir.y,
                        y: -dir.x,
                        z: rng.random_range(t_lo..t_hi),
                    };

                    Shard {
                        polygon,
                        motion: ShardMotion {
                            centroid,
                            offset: velocity,
                            velocity,
                            rotation: 0.0,
                            spin,
                            axis,
                            delay,
                        },
                    }
                })
                .collect()
        })
        .collect()
}
