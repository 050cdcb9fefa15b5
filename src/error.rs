// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur while computing an isochrone.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// A road segment is ill-formed, e.g. it has fewer than 2 coordinates.
    /// The whole graph build is abandoned.
    #[error("malformed segment #{segment}: {reason}")]
    MalformedInput { segment: usize, reason: &'static str },

    /// The graph has no nodes, or its node nearest to the origin
    /// is farther away than the distance budget.
    #[error("origin is not reachable within the distance budget")]
    NoReachableOrigin,

    /// A hull can't be built from fewer than 3 points.
    /// Not fatal: the engine returns an empty boundary instead.
    #[error("insufficient boundary points: {0} (need at least 3)")]
    InsufficientBoundaryPoints(usize),

    /// The distance budget must be a finite, non-negative number of meters.
    #[error("invalid distance budget: {0}")]
    InvalidBudget(f64),
}
