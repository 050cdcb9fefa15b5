// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{earth_distance, Coordinate, CoordinateKey, Error, Segment};

/// Index of a node in a [Graph]. Stable for the lifetime of the graph.
pub type NodeId = usize;

/// Represents a connection from a node to one of its neighbors.
///
/// Edges are undirected: every edge is stored in the adjacency lists
/// of both endpoints, with the same `weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,

    /// Great-circle distance between the endpoints, in meters.
    pub weight: f64,
}

/// Represents a road network as a set of nodes, identified by their
/// [Coordinates](Coordinate), and undirected [Edges](Edge) between them.
///
/// Nodes live in an arena and are referred to by [NodeId]s;
/// an auxiliary lookup maps coordinates back onto ids.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Coordinate>,
    index: HashMap<CoordinateKey, NodeId>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw road segments.
    ///
    /// Every pair of consecutive coordinates in a segment becomes an undirected edge,
    /// weighted by the [earth_distance] between them. Coordinates shared between segments
    /// become shared nodes, and overlapping pairs collapse into a single edge.
    ///
    /// Fails with [Error::MalformedInput] if any segment has fewer than 2 coordinates,
    /// or a non-finite coordinate; no partial graph is returned in that case.
    pub fn from_segments(segments: &[Segment]) -> Result<Self, Error> {
        for (idx, segment) in segments.iter().enumerate() {
            if segment.len() < 2 {
                return Err(Error::MalformedInput {
                    segment: idx,
                    reason: "fewer than 2 coordinates",
                });
            }
            if !segment.iter().all(Coordinate::is_finite) {
                return Err(Error::MalformedInput {
                    segment: idx,
                    reason: "non-finite coordinate",
                });
            }
        }

        let mut g = Self::default();
        for (idx, segment) in segments.iter().enumerate() {
            let added = g.add_segment(segment);
            if added == 0 {
                log::debug!("segment #{} contributes no new edges, skipping", idx);
            }
        }

        log::debug!(
            "built graph with {} nodes and {} edges from {} segments",
            g.len(),
            g.edge_count,
            segments.len()
        );
        Ok(g)
    }

    /// Adds all edges from a single segment, returning the number of new edges.
    fn add_segment(&mut self, segment: &[Coordinate]) -> usize {
        segment
            .windows(2)
            .filter(|pair| {
                let a = self.get_or_insert_node(pair[0]);
                let b = self.get_or_insert_node(pair[1]);
                self.add_edge(a, b)
            })
            .count()
    }

    /// Returns the id of the node at the given position, creating it if necessary.
    pub fn get_or_insert_node(&mut self, at: Coordinate) -> NodeId {
        match self.index.entry(at.key()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.nodes.len();
                self.nodes.push(at);
                self.adjacency.push(Vec::default());
                e.insert(id);
                id
            }
        }
    }

    /// Creates an undirected edge between two existing nodes.
    ///
    /// Returns false (and leaves the graph untouched) for self-loops
    /// and for already existing edges. The weight is always computed
    /// from the lower id to the higher id, so it does not depend on
    /// the order in which segments were added.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        assert!(a < self.nodes.len() && b < self.nodes.len());

        if a == b || self.adjacency[a].iter().any(|e| e.to == b) {
            return false;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let weight = earth_distance(self.nodes[lo], self.nodes[hi]);

        self.adjacency[a].push(Edge { to: b, weight });
        self.adjacency[b].push(Edge { to: a, weight });
        self.edge_count += 1;
        true
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the position of a node.
    pub fn node(&self, id: NodeId) -> Option<Coordinate> {
        self.nodes.get(id).copied()
    }

    /// Looks up a node by its exact position.
    pub fn find_node(&self, at: Coordinate) -> Option<NodeId> {
        self.index.get(&at.key()).copied()
    }

    /// Returns an iterator over all nodes, with their ids, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Coordinate)> + '_ {
        self.nodes.iter().copied().enumerate()
    }

    /// Gets all [Edges](Edge) incident to a node.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.adjacency
            .get(id)
            .map(|e| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the weight of the edge between two nodes.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> f64 {
        self.neighbors(a)
            .iter()
            .find_map(|e| if e.to == b { Some(e.weight) } else { None })
            .unwrap_or(f64::INFINITY)
    }

    /// Returns an iterator over every undirected edge exactly once,
    /// as `(a, b, weight)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(a, edges)| {
            edges
                .iter()
                .filter(move |e| e.to > a)
                .map(move |e| (a, e.to, e.weight))
        })
    }

    /// Finds the closest node to the given position,
    /// returning its id and the distance to it in meters.
    /// Ties are resolved in favor of the lowest id.
    ///
    /// This function requires computing the distance to every node in the graph;
    /// see [KDTree](crate::KDTree) for a faster alternative on large graphs.
    pub fn find_nearest_node(&self, at: Coordinate) -> Option<(NodeId, f64)> {
        self.iter()
            .map(|(id, nd)| (id, earth_distance(at, nd)))
            .fold(None, |best, (id, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((id, dist)),
            })
    }
}
