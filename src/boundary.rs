// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{interpolate, Coordinate, DistanceMap, Edge, Graph};

/// Frontier of a [bounded search](crate::bounded_dijkstra), clipped at its budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary {
    /// Points where an edge crosses the budget, interpolated between its settled
    /// and excluded endpoints. Deduplicated and sorted by (lat, lon).
    pub crossings: Vec<Coordinate>,

    /// Positions of all settled nodes, sorted by (lat, lon).
    pub interior_nodes: Vec<Coordinate>,

    /// Positions of settled nodes with at least one edge crossing the budget,
    /// sorted by (lat, lon).
    pub frontier_nodes: Vec<Coordinate>,

    /// Edges with both endpoints settled, in the order their endpoints were settled.
    pub interior_edges: Vec<(Coordinate, Coordinate)>,
}

impl Boundary {
    /// Returns all points which may shape the isochrone boundary: settled nodes
    /// and budget crossings, deduplicated and sorted by (lat, lon).
    pub fn points(&self) -> Vec<Coordinate> {
        let mut points = Vec::with_capacity(self.interior_nodes.len() + self.crossings.len());
        points.extend_from_slice(&self.interior_nodes);
        points.extend_from_slice(&self.crossings);
        sort_and_dedup(&mut points);
        points
    }

    pub fn is_empty(&self) -> bool {
        self.interior_nodes.is_empty()
    }
}

/// Walks the edges of all settled nodes, collecting fully-inside edges
/// and points where edges cross the distance budget.
///
/// For an edge `u-v` with only `u` settled, the crossing lies at
/// `(budget - dist(u)) / weight(u, v)` of the way from `u` to `v`.
pub fn extract_boundary(g: &Graph, distances: &DistanceMap) -> Boundary {
    let budget = distances.budget();
    let mut b = Boundary::default();

    for (u, u_dist) in distances.iter() {
        let Some(u_at) = g.node(u) else {
            continue;
        };
        b.interior_nodes.push(u_at);

        let mut is_frontier = false;
        for &Edge { to: v, weight } in g.neighbors(u) {
            let Some(v_at) = g.node(v) else {
                continue;
            };

            if distances.contains(v) {
                if u < v {
                    b.interior_edges.push((u_at, v_at));
                }
            } else {
                let fraction = (budget - u_dist) / weight;
                b.crossings.push(interpolate(u_at, v_at, fraction));
                is_frontier = true;
            }
        }

        if is_frontier {
            b.frontier_nodes.push(u_at);
        }
    }

    sort_and_dedup(&mut b.crossings);
    sort_and_dedup(&mut b.interior_nodes);
    sort_and_dedup(&mut b.frontier_nodes);

    log::trace!(
        "boundary: {} interior nodes, {} crossings, {} interior edges",
        b.interior_nodes.len(),
        b.crossings.len(),
        b.interior_edges.len()
    );
    b
}

fn sort_and_dedup(points: &mut Vec<Coordinate>) {
    points.sort_by(Coordinate::cmp_lat_lon);
    points.dedup_by_key(|p| p.key());
}
