// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod bounded;
mod distance_map;

pub(crate) use bounded::check_budget;
pub use bounded::{bounded_dijkstra, bounded_dijkstra_from_node};
pub use distance_map::DistanceMap;
