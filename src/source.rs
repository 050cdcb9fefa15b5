// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::convert::Infallible;

use crate::{earth_distance, Coordinate, Segment};

/// Supplier of raw road data around a query point.
///
/// Deciding which ways are traversable is the responsibility of the source,
/// not of the engine. Returning no segments is valid and results in an empty isochrone.
///
/// Any `Fn(Coordinate, f64) -> Result<Vec<Segment>, E>` is a RoadSource.
pub trait RoadSource {
    type Error;

    /// Returns all traversable ways within `radius` meters of `center`.
    /// Ways may extend beyond the radius.
    fn fetch_segments(
        &self,
        center: Coordinate,
        radius: f64,
    ) -> Result<Vec<Segment>, Self::Error>;
}

impl<F, E> RoadSource for F
where
    F: Fn(Coordinate, f64) -> Result<Vec<Segment>, E>,
{
    type Error = E;

    fn fetch_segments(&self, center: Coordinate, radius: f64) -> Result<Vec<Segment>, E> {
        self(center, radius)
    }
}

/// [RoadSource] over segments already loaded into memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    segments: Vec<Segment>,
}

impl MemorySource {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl RoadSource for MemorySource {
    type Error = Infallible;

    /// Returns the stored segments clipped with [clip_to_radius].
    /// Segments with fewer than 2 coordinates are passed through as-is,
    /// so that the engine can reject them.
    fn fetch_segments(
        &self,
        center: Coordinate,
        radius: f64,
    ) -> Result<Vec<Segment>, Infallible> {
        Ok(self
            .segments
            .iter()
            .flat_map(|segment| {
                if segment.len() < 2 {
                    vec![segment.clone()]
                } else {
                    clip_to_radius(segment, center, radius)
                }
            })
            .collect())
    }
}

/// Splits a way into runs of consecutive coordinate pairs with at least one
/// coordinate within `radius` meters of `center`. Pairs entirely outside of the
/// radius are dropped; pairs leaving the radius are kept whole, so that edges crossing
/// a distance budget equal to the radius are still present.
pub(crate) fn clip_to_radius(
    way: &[Coordinate],
    center: Coordinate,
    radius: f64,
) -> Vec<Segment> {
    let inside: Vec<bool> = way
        .iter()
        .map(|&p| !(earth_distance(center, p) > radius))
        .collect();

    let mut runs = Vec::default();
    let mut current: Segment = Vec::default();

    for i in 1..way.len() {
        if inside[i - 1] || inside[i] {
            if current.is_empty() {
                current.push(way[i - 1]);
            }
            current.push(way[i]);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
