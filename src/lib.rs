// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Network-constrained isochrone boundaries over road data.
//!
//! Walkshed converts raw road segments into an undirected weighted graph,
//! runs a distance-bounded Dijkstra from an origin, clips the network at the
//! distance budget and turns the reached area into a polygon, optionally
//! smoothed for rendering. Road data is supplied by a [RoadSource]; an
//! OpenStreetMap XML reader is available in [osm].
//!
//! # Example
//!
//! ```no_run
//! let source = walkshed::osm::OsmSource::from_file(
//!     "path/to/monaco.osm",
//!     &walkshed::osm::FOOT_PROFILE,
//! ).expect("failed to load monaco.osm");
//!
//! let origin = walkshed::Coordinate::new(43.7384, 7.4246);
//! let options = walkshed::Options::default();
//! let isochrone = walkshed::isochrone_from_source(&source, origin, &options)
//!     .expect("failed to compute the isochrone");
//!
//! let geojson = serde_json::to_string(&isochrone.to_geojson())
//!     .expect("failed to serialize the isochrone");
//! println!("{}", geojson);
//! ```

use std::cmp::Ordering;

mod boundary;
mod dijkstra;
mod distance;
mod engine;
mod error;
mod geojson;
mod graph;
mod hull;
mod kd;
pub mod osm;
mod smooth;
mod source;

pub use boundary::{extract_boundary, Boundary};
pub use dijkstra::{bounded_dijkstra, bounded_dijkstra_from_node, DistanceMap};
pub use distance::{earth_distance, interpolate, EARTH_RADIUS};
pub use engine::{
    compute_isochrone, isochrone_from_graph, isochrone_from_source, isochrones_from_graph,
    Isochrone, Options, DEFAULT_BUDGET, DEFAULT_SMOOTHING_SAMPLES,
};
pub use error::Error;
pub use self::geojson::{circle_polygon, polygon_feature};
pub use graph::{Edge, Graph, NodeId};
pub use hull::{build_hull, concave_hull, convex_hull, Hull, HullStrategy, DEFAULT_ALPHA};
pub use kd::KDTree;
pub use smooth::{smooth_closed, smooth_open};
pub use source::{MemorySource, RoadSource};

/// Position on Earth, in decimal degrees.
///
/// Two coordinates are equal only if both components are exactly equal.
/// Any tolerance must be applied by the caller before the data reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns a hashable key with the same equality semantics as the coordinate itself.
    pub fn key(&self) -> CoordinateKey {
        CoordinateKey(canonical_bits(self.lat), canonical_bits(self.lon))
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Total order by (lat, lon), consistent with [Coordinate::key]:
    /// `-0.0` and `0.0` compare as equal.
    pub fn cmp_lat_lon(&self, other: &Self) -> Ordering {
        canonical(self.lat)
            .total_cmp(&canonical(other.lat))
            .then_with(|| canonical(self.lon).total_cmp(&canonical(other.lon)))
    }
}

/// Structural identity of a [Coordinate], usable in hash maps and sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey(u64, u64);

#[inline]
fn canonical(x: f64) -> f64 {
    // -0.0 == 0.0, so both must map onto the same value
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

#[inline]
fn canonical_bits(x: f64) -> u64 {
    canonical(x).to_bits()
}

/// A single continuous way, as an ordered list of at least 2 [Coordinates](Coordinate).
pub type Segment = Vec<Coordinate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_key_matches_equality() {
        assert_eq!(
            Coordinate::new(52.2297, 21.0122).key(),
            Coordinate::new(52.2297, 21.0122).key(),
        );
        assert_ne!(
            Coordinate::new(52.2297, 21.0122).key(),
            Coordinate::new(52.2297, 21.0123).key(),
        );
        assert_eq!(
            Coordinate::new(0.0, 10.0).key(),
            Coordinate::new(-0.0, 10.0).key()
        );
    }

    #[test]
    fn cmp_lat_lon_treats_zeros_as_equal() {
        let a = Coordinate::new(-0.0, 1.0);
        let b = Coordinate::new(0.0, 1.0);
        assert_eq!(a.cmp_lat_lon(&b), Ordering::Equal);
        assert_eq!(
            Coordinate::new(0.0, -0.5).cmp_lat_lon(&Coordinate::new(-0.0, 0.5)),
            Ordering::Less
        );
        assert_eq!(
            Coordinate::new(1.0, 0.0).cmp_lat_lon(&Coordinate::new(-0.0, 5.0)),
            Ordering::Greater
        );
    }
}
