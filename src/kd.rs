// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Coordinate, Graph, NodeId, EARTH_RADIUS};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// used to snap query origins onto the nearest node of a [Graph]. A linear scan
/// ([Graph::find_nearest_node]) is fine for tiny graphs, but dominates query time once
/// a source returns a few thousand segments.
///
/// Space is split alternately along parallels and meridians, in plain degrees.
/// This results in undefined behavior when points are close to the ante meridian
/// (180°/-180° longitude) or poles (90°/-90° latitude).
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: (NodeId, Coordinate),
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest node to the given position, returning its id
    /// and the distance to it in meters. Ties are resolved in favor of the lowest id.
    pub fn find_nearest_node(&self, at: Coordinate) -> (NodeId, f64) {
        self.find_nearest_node_impl(at, false)
    }

    fn find_nearest_node_impl(&self, at: Coordinate, lon_divides: bool) -> (NodeId, f64) {
        // Start by assuming that pivot is the closest
        let (pivot_id, pivot) = self.pivot;
        let mut best = (pivot_id, earth_distance(at, pivot));

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            at.lon < pivot.lon
        } else {
            at.lat < pivot.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(ref branch) = first {
            best = closer(best, branch.find_nearest_node_impl(at, !lon_divides));
        }

        if let Some(ref branch) = second {
            // A closer (or equally close) node is possible in the second branch if and only if
            // the splitting axis is not farther than the current best candidate.
            if distance_to_axis(at, pivot, lon_divides) <= best.1 {
                best = closer(best, branch.find_nearest_node_impl(at, !lon_divides));
            }
        }

        best
    }

    /// Builds a k-d tree over all nodes of a [Graph].
    /// Returns `None` for an empty graph.
    pub fn from_graph(g: &Graph) -> Option<Self> {
        let mut nodes = g.iter().collect::<Vec<_>>();
        Self::build(nodes.as_mut_slice())
    }

    /// Builds a k-d tree from a mutable slice of `(id, position)` pairs. Pairs will be
    /// reordered in the slice to facilitate building the tree.
    pub fn build(nodes: &mut [(NodeId, Coordinate)]) -> Option<Self> {
        Self::build_impl(nodes, false)
    }

    fn build_impl(nodes: &mut [(NodeId, Coordinate)], lon_divides: bool) -> Option<Self> {
        match nodes.len() {
            0 => None,
            1 => Some(Self {
                pivot: nodes[0],
                left: None,
                right: None,
            }),
            _ => {
                if lon_divides {
                    nodes.sort_by(|a, b| a.1.lon.total_cmp(&b.1.lon).then(a.0.cmp(&b.0)));
                } else {
                    nodes.sort_by(|a, b| a.1.lat.total_cmp(&b.1.lat).then(a.0.cmp(&b.0)));
                }
                let median = nodes.len() / 2;
                let pivot = nodes[median];
                let (left, right_and_pivot) = nodes.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: Self::build_impl(left, !lon_divides).map(Box::new),
                    right: Self::build_impl(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}

/// Returns the shortest distance from `at` to the parallel (`lon_divides == false`)
/// or meridian (`lon_divides == true`) going through `pivot`.
fn distance_to_axis(at: Coordinate, pivot: Coordinate, lon_divides: bool) -> f64 {
    if !lon_divides {
        return earth_distance(at, Coordinate::new(pivot.lat, at.lon));
    }

    let dlon = (at.lon - pivot.lon).to_radians();
    if dlon.abs() >= std::f64::consts::FRAC_PI_2 {
        // Far away - always explore
        return 0.0;
    }

    // Cross-track distance to a meridian
    EARTH_RADIUS * (at.lat.to_radians().cos() * dlon.sin()).abs().min(1.0).asin()
}

#[inline]
fn closer(a: (NodeId, f64), b: (NodeId, f64)) -> (NodeId, f64) {
    if b.1 < a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}
