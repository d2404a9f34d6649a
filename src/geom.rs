//! Geometry builder: randomized radial tessellation of a rectangle.
//!
//! The shatter effect cuts the target rectangle into polygon shards arranged
//! in concentric rings. Rays are cast from the center at irregular random
//! angles, clipped against the rectangle boundary, and subdivided at jittered
//! depths; quadrilaterals between angular neighbours form the rings and four
//! corner triangles close the gaps the outermost chords leave at the corners.
//! The irregularity is intentional — a shattered-glass look rather than pie
//! slices.
//!
//! Everything here is deterministic given the caller's random source, so the
//! full pipeline is unit-testable on the host.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use rand::Rng;

use crate::consts::{
    ANGLE_WEIGHT_BASE, ANGLE_WEIGHT_DELTA, CORNER_TOLERANCE, EDGE_REACH, EDGE_WEIGHTS,
    NEAR_VERTICAL, SLOPE_CLAMP,
};

/// A point or direction in effect-local coordinates (CSS pixels, origin at
/// the rectangle's top-left, y growing downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            return Self::new(0.0, 0.0);
        }
        Self::new(self.x / len, self.y / len)
    }
}

/// The rectangle being shattered, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the rectangle in local coordinates.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A closed shard outline: 3 or 4 vertices ordered so a `clip-path`
/// rendering draws the correct shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    #[must_use]
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Vertices in drawing order.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Arithmetic mean of the vertices. This is the rotation pivot the
    /// kinematics stage uses, not the exact area centroid.
    #[must_use]
    pub fn centroid(&self) -> Vec2 {
        let sum = self
            .points
            .iter()
            .fold(Vec2::new(0.0, 0.0), |acc, p| Vec2::new(acc.x + p.x, acc.y + p.y));
        let n = self.points.len().max(1) as f64;
        Vec2::new(sum.x / n, sum.y / n)
    }

    /// Unsigned area by the shoelace formula.
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        twice.abs() / 2.0
    }

    /// CSS `clip-path` value for this outline, e.g. `polygon(0px 0px, ...)`.
    #[must_use]
    pub fn clip_path(&self) -> String {
        let body = self
            .points
            .iter()
            .map(|p| format!("{}px {}px", p.x, p.y))
            .collect::<Vec<_>>()
            .join(", ");
        format!("polygon({body})")
    }
}

/// Sample `count` radial unit directions from an irregular angular partition.
///
/// Each direction gets a random weight in `[base, base + delta)`; the weights
/// are normalized so they sum to 2π and accumulated from a uniformly random
/// start angle. Larger `delta` relative to `base` gives a more uneven split.
#[must_use]
pub fn base_vectors(count: usize, base: f64, delta: f64, rng: &mut impl Rng) -> Vec<Vec2> {
    let weights: Vec<f64> = (0..count).map(|_| rng.random_range(base..base + delta)).collect();
    let sum: f64 = weights.iter().sum();
    let increments: Vec<f64> = weights.iter().map(|w| std::f64::consts::TAU * w / sum).collect();

    let mut angle = rng.random_range(0.0..std::f64::consts::TAU);
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        if i != 0 {
            angle += increments[i - 1];
        }
        out.push(Vec2::new(angle.cos(), angle.sin()));
    }
    out
}

/// Clip each radial direction against the rectangle boundary.
///
/// The edge is chosen by comparing the direction's slope against the
/// rectangle's aspect slope; near-vertical directions use [`SLOPE_CLAMP`]
/// instead of dividing by a vanishing x. Results are clamped numerically to
/// the boundary and returned in local (top-left origin) coordinates.
#[must_use]
pub fn line_ends(size: Size, vectors: &[Vec2]) -> Vec<Vec2> {
    let center = size.center();
    let aspect_slope = size.height / size.width;

    vectors
        .iter()
        .map(|v| {
            let slope = if v.x.abs() > NEAR_VERTICAL { v.y / v.x } else { SLOPE_CLAMP };

            let mut end = if v.x >= 0.0 && slope.abs() < aspect_slope {
                Vec2::new(size.width / 2.0, slope * size.width / 2.0)
            } else if v.x < 0.0 && slope.abs() < aspect_slope {
                Vec2::new(-size.width / 2.0, slope * -size.width / 2.0)
            } else if v.y >= 0.0 {
                Vec2::new((1.0 / slope) * size.height / 2.0, size.height / 2.0)
            } else {
                Vec2::new((1.0 / slope) * -size.height / 2.0, -size.height / 2.0)
            };

            end.x = end.x.clamp(-size.width / 2.0, size.width / 2.0);
            end.y = end.y.clamp(-size.height / 2.0, size.height / 2.0);

            Vec2::new(end.x + center.x, end.y + center.y)
        })
        .collect()
}

/// Subdivide each center-to-endpoint segment into an ordered point list.
///
/// `weights` carries the relative depth of each ring boundary; every segment
/// is jittered by a uniform factor in `[0.5, 1.0)` against a reach of
/// `len_rate` of the full length, so the rings are irregular and
/// non-concentric. Each returned edge has `weights.len() + 2` points: the
/// center, the ring boundaries, and the endpoint.
#[must_use]
pub fn divided_edges(
    size: Size,
    ends: &[Vec2],
    len_rate: f64,
    weights: &[f64],
    rng: &mut impl Rng,
) -> Vec<Vec<Vec2>> {
    let center = size.center();
    let weight_sum: f64 = weights.iter().sum();

    ends.iter()
        .map(|end| {
            let v = Vec2::new(end.x - center.x, end.y - center.y);
            let len = v.length();
            let dir = v.normalized();

            let mut edge = Vec::with_capacity(weights.len() + 2);
            edge.push(center);
            for w in weights {
                let base_rate = w / weight_sum;
                let rate = base_rate * rng.random_range(0.5..1.0);
                let step = len * len_rate * rate;
                let prev = edge[edge.len() - 1];
                edge.push(Vec2::new(prev.x + dir.x * step, prev.y + dir.y * step));
            }
            edge.push(*end);
            edge
        })
        .collect()
}

/// Form the polygon rings between angular neighbours.
///
/// Ring `j` pairs point `j` and `j + 1` of each divided edge with the same
/// points of the next edge (modular, so the ring closes). The innermost ring
/// shares the center, so its cells are triangles; every other cell is a
/// quadrilateral.
#[must_use]
pub fn polygon_rings(edges: &[Vec<Vec2>]) -> Vec<Vec<Polygon>> {
    if edges.is_empty() {
        return Vec::new();
    }
    let depth = edges[0].len() - 1;
    let mut rings = Vec::with_capacity(depth);

    for j in 0..depth {
        let mut ring = Vec::with_capacity(edges.len());
        for i in 0..edges.len() {
            let next = &edges[(i + 1) % edges.len()];
            let edge = &edges[i];

            let mut points = Vec::with_capacity(4);
            if j != 0 {
                points.push(edge[j]);
            }
            points.push(next[j]);
            points.push(next[j + 1]);
            points.push(edge[j + 1]);

            ring.push(Polygon::new(points));
        }
        rings.push(ring);
    }
    rings
}

/// Triangles closing the four rectangle corners.
///
/// For each corner the nearest endpoint on each adjacent side is selected by
/// min/max; the triangle is the corner point plus those two boundary points.
/// When no endpoint lies on an adjacent side (a ray coincides with the
/// corner, or a side received no rays) the corner is skipped, leaving an
/// acceptable visual gap.
#[must_use]
pub fn corner_polygons(size: Size, ends: &[Vec2]) -> Vec<Polygon> {
    let on_side = |v: f64, target: f64| (v - target).abs() <= CORNER_TOLERANCE;
    let xs_on = |y: f64| ends.iter().filter(move |e| on_side(e.y, y)).map(|e| e.x);
    let ys_on = |x: f64| ends.iter().filter(move |e| on_side(e.x, x)).map(|e| e.y);

    let top_min = xs_on(0.0).reduce(f64::min);
    let top_max = xs_on(0.0).reduce(f64::max);
    let bottom_min = xs_on(size.height).reduce(f64::min);
    let bottom_max = xs_on(size.height).reduce(f64::max);
    let left_min = ys_on(0.0).reduce(f64::min);
    let left_max = ys_on(0.0).reduce(f64::max);
    let right_min = ys_on(size.width).reduce(f64::min);
    let right_max = ys_on(size.width).reduce(f64::max);

    let mut corners = Vec::with_capacity(4);

    if let (Some(ly), Some(tx)) = (left_min, top_min) {
        corners.push(Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, ly),
            Vec2::new(tx, 0.0),
        ]));
    }
    if let (Some(tx), Some(ry)) = (top_max, right_min) {
        corners.push(Polygon::new(vec![
            Vec2::new(size.width, 0.0),
            Vec2::new(tx, 0.0),
            Vec2::new(size.width, ry),
        ]));
    }
    if let (Some(bx), Some(ly)) = (bottom_min, left_max) {
        corners.push(Polygon::new(vec![
            Vec2::new(0.0, size.height),
            Vec2::new(bx, size.height),
            Vec2::new(0.0, ly),
        ]));
    }
    if let (Some(ry), Some(bx)) = (right_max, bottom_max) {
        corners.push(Polygon::new(vec![
            Vec2::new(size.width, size.height),
            Vec2::new(size.width, ry),
            Vec2::new(bx, size.height),
        ]));
    }

    corners
}

/// Run the full tessellation: rings ordered innermost to outermost, with the
/// corner triangles appended to the outermost ring.
///
/// `shard_count` below 3 degenerates into self-overlapping geometry and is
/// rejected by option validation; 8 or more is recommended.
#[must_use]
pub fn polygon_groups(size: Size, shard_count: usize, rng: &mut impl Rng) -> Vec<Vec<Polygon>> {
    if shard_count == 0 {
        return Vec::new();
    }

    let vectors = base_vectors(shard_count, ANGLE_WEIGHT_BASE, ANGLE_WEIGHT_DELTA, rng);
    let ends = line_ends(size, &vectors);
    let edges = divided_edges(size, &ends, EDGE_REACH, &EDGE_WEIGHTS, rng);
    let mut groups = polygon_rings(&edges);

    let corners = corner_polygons(size, &ends);
    if let Some(outermost) = groups.last_mut() {
        outermost.extend(corners);
    }

    groups
}
