// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

use super::DistanceMap;
use crate::{Coordinate, Edge, Error, Graph, NodeId};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: NodeId,
    cost: f64,
    seq: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs (and earlier insertions) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest distances from `origin` to all nodes within `budget` meters.
///
/// `origin` does not need to be a node of the graph - it is first snapped to the
/// nearest node, and the snap distance is added to every resulting distance.
///
/// Returns [Error::NoReachableOrigin] if the graph is empty, or the nearest node
/// is farther away than the budget.
pub fn bounded_dijkstra(g: &Graph, origin: Coordinate, budget: f64) -> Result<DistanceMap, Error> {
    check_budget(budget)?;
    let (start, snap_distance) = g.find_nearest_node(origin).ok_or(Error::NoReachableOrigin)?;
    bounded_dijkstra_from_node(g, start, snap_distance, budget)
}

/// Same as [bounded_dijkstra], but starting from an already snapped node,
/// with `offset` meters already spent to get to that node.
pub fn bounded_dijkstra_from_node(
    g: &Graph,
    start: NodeId,
    offset: f64,
    budget: f64,
) -> Result<DistanceMap, Error> {
    check_budget(budget)?;
    if start >= g.len() || !(offset <= budget) {
        return Err(Error::NoReachableOrigin);
    }

    let mut distances = DistanceMap::new(start, offset, budget, g.len());
    let mut settled = vec![false; g.len()];
    let mut known_costs = vec![f64::INFINITY; g.len()];
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut seq: u64 = 0;

    known_costs[start] = offset;
    queue.push(QueueItem {
        at: start,
        cost: offset,
        seq,
    });

    while let Some(item) = queue.pop() {
        // Stale queue entries are left behind whenever a cheaper path is found;
        // the first entry popped for a node always carries its shortest distance.
        if settled[item.at] {
            continue;
        }
        settled[item.at] = true;
        distances.settle(item.at, item.cost);

        for &Edge {
            to: neighbor,
            weight,
        } in g.neighbors(item.at)
        {
            if settled[neighbor] {
                continue;
            }

            // Neighbors beyond the budget are never settled; the boundary
            // extractor recovers them from the edges of settled nodes.
            let neighbor_cost = item.cost + weight;
            if neighbor_cost > budget || neighbor_cost >= known_costs[neighbor] {
                continue;
            }

            seq += 1;
            known_costs[neighbor] = neighbor_cost;
            queue.push(QueueItem {
                at: neighbor,
                cost: neighbor_cost,
                seq,
            });
        }
    }

    log::trace!(
        "bounded search from node {} settled {} of {} nodes within {} m",
        start,
        distances.len(),
        g.len(),
        budget
    );
    Ok(distances)
}

pub(crate) fn check_budget(budget: f64) -> Result<(), Error> {
    if budget.is_finite() && budget >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidBudget(budget))
    }
}
