// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::NodeId;

/// Result of a [bounded_dijkstra](crate::bounded_dijkstra) search:
/// final shortest-path distances of all nodes settled within the budget.
///
/// Nodes which were never reached, or only reached beyond the budget, are absent.
/// All distances include the snap distance between the query origin and the
/// origin node.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    origin: NodeId,
    snap_distance: f64,
    budget: f64,
    distances: Vec<f64>,
    settled: Vec<NodeId>,
}

impl DistanceMap {
    pub(super) fn new(origin: NodeId, snap_distance: f64, budget: f64, node_count: usize) -> Self {
        Self {
            origin,
            snap_distance,
            budget,
            distances: vec![f64::INFINITY; node_count],
            settled: Vec::default(),
        }
    }

    pub(super) fn settle(&mut self, node: NodeId, distance: f64) {
        debug_assert!(self.distances[node].is_infinite());
        debug_assert!(distance <= self.budget);
        debug_assert!(self
            .settled
            .last()
            .map_or(true, |&prev| self.distances[prev] <= distance));

        self.distances[node] = distance;
        self.settled.push(node);
    }

    /// The node the query origin was snapped to.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Distance between the query origin and the [origin node](DistanceMap::origin), in meters.
    pub fn snap_distance(&self) -> f64 {
        self.snap_distance
    }

    /// The distance budget of the search, in meters.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Returns the shortest distance to a node, or `None` if the node was not settled
    /// within the budget.
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.distances
            .get(node)
            .copied()
            .filter(|d| d.is_finite())
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Returns the number of settled nodes.
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }

    /// Returns an iterator over settled nodes and their distances,
    /// in the order they were settled (non-decreasing distance).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.settled.iter().map(|&node| (node, self.distances[node]))
    }
}
