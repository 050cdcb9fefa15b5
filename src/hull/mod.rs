// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Coordinate;

mod concave;
mod convex;

pub use concave::concave_hull;
pub use convex::convex_hull;

/// Recommended maximum distance between consecutive vertices
/// of a [concave hull](HullStrategy::Concave), in meters.
pub const DEFAULT_ALPHA: f64 = 20.0;

/// Method of reducing boundary points to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HullStrategy {
    /// [Convex hull](convex_hull) - never self-intersects, but fills in every concavity
    /// and overestimates the reachable area near dead ends and narrow street canyons.
    #[default]
    Convex,

    /// [Distance-bounded concave hull](concave_hull) - follows the street network
    /// more tightly, but may produce open or degenerate chains on sparse data.
    Concave {
        /// Maximum distance between consecutive vertices, in meters.
        alpha: f64,
    },
}

impl HullStrategy {
    /// Concave hull with the [DEFAULT_ALPHA].
    pub const CONCAVE: Self = Self::Concave {
        alpha: DEFAULT_ALPHA,
    };
}

/// Ordered polygon vertices, counter-clockwise in (lon, lat) space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hull {
    pub vertices: Vec<Coordinate>,

    /// Whether the last vertex connects back to the first one.
    /// Always true for non-degenerate convex hulls.
    pub closed: bool,
}

impl Hull {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if the hull has too few vertices to enclose any area.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

/// Reduces a set of points to a [Hull] with the given [HullStrategy].
///
/// Fewer than 3 points are returned unchanged, as an open hull.
pub fn build_hull(points: &[Coordinate], strategy: HullStrategy) -> Hull {
    match strategy {
        HullStrategy::Convex => {
            let vertices = convex_hull(points);
            let closed = vertices.len() >= 3;
            Hull { vertices, closed }
        }
        HullStrategy::Concave { alpha } => concave_hull(points, alpha),
    }
}

/// Cross product of `o->a` and `o->b`, with x = lon and y = lat.
/// Positive for a counter-clockwise (left) turn.
#[inline]
pub(crate) fn cross(o: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    (a.lon - o.lon) * (b.lat - o.lat) - (a.lat - o.lat) * (b.lon - o.lon)
}

/// Twice the signed area of a closed ring; positive for counter-clockwise rings.
#[cfg(test)]
pub(crate) fn signed_area(ring: &[Coordinate]) -> f64 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.lon * b.lat - b.lon * a.lat)
        .sum()
}
