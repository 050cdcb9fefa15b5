// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::error::Error as StdError;

use crate::dijkstra::check_budget;
use crate::{
    bounded_dijkstra, bounded_dijkstra_from_node, build_hull, extract_boundary, smooth_closed,
    smooth_open, Coordinate, DistanceMap, Error, Graph, Hull, HullStrategy, KDTree, RoadSource,
    Segment,
};

/// Recommended distance budget, in meters.
pub const DEFAULT_BUDGET: f64 = 500.0;

/// Recommended amount of points sampled on every hull edge when smoothing.
pub const DEFAULT_SMOOTHING_SAMPLES: usize = 10;

/// Controls for computing an [Isochrone].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Maximum travel distance from the origin, in meters.
    pub budget: f64,

    /// How the reached points are reduced to a polygon.
    pub hull: HullStrategy,

    /// Samples per hull edge for [smooth_closed] (or [smooth_open] for open hulls),
    /// or `None` to return the raw hull.
    pub smooth: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            hull: HullStrategy::Convex,
            smooth: Some(DEFAULT_SMOOTHING_SAMPLES),
        }
    }
}

/// Area reachable from an origin within a distance budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Isochrone {
    /// Polygon vertices, counter-clockwise in (lon, lat) space, without
    /// the closing point. Empty if fewer than 3 points were reached.
    ///
    /// If the boundary is not [closed](Isochrone::closed), this is an open chain:
    /// its last and first vertices are not connected.
    pub boundary: Vec<Coordinate>,

    /// Whether the boundary is a proper ring. Only [concave hulls](HullStrategy::Concave)
    /// may produce an open boundary, when its last vertex is at least alpha meters
    /// away from the first one.
    pub closed: bool,

    /// Road pieces with both ends within the budget, for overlays.
    pub interior_edges: Vec<(Coordinate, Coordinate)>,

    /// Number of road graph nodes reached within the budget.
    pub reached_nodes: usize,

    /// Distance budget used to compute the isochrone, in meters.
    pub budget: f64,
}

impl Isochrone {
    /// Returns an isochrone with nothing reached.
    pub fn empty(budget: f64) -> Self {
        Self {
            budget,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty() && self.interior_edges.is_empty()
    }

    /// Returns the boundary, or [Error::InsufficientBoundaryPoints] if it can't enclose any area.
    pub fn polygon(&self) -> Result<&[Coordinate], Error> {
        if self.boundary.len() < 3 {
            Err(Error::InsufficientBoundaryPoints(self.boundary.len()))
        } else {
            Ok(&self.boundary)
        }
    }
}

/// Builds a road [Graph] from the provided segments and computes the [Isochrone]
/// around `origin`. See [isochrone_from_graph].
///
/// Fails with [Error::MalformedInput] if any of the segments is ill-formed;
/// no partial result is returned in that case.
pub fn compute_isochrone(
    segments: &[Segment],
    origin: Coordinate,
    options: &Options,
) -> Result<Isochrone, Error> {
    check_budget(options.budget)?;
    let g = Graph::from_segments(segments)?;
    isochrone_from_graph(&g, origin, options)
}

/// Computes the [Isochrone] around `origin` over an existing [Graph].
///
/// An empty graph, or an origin farther away from the network than the budget,
/// results in an empty isochrone. So does reaching fewer than 3 distinct points,
/// although interior edges are still returned in that case.
///
/// The only possible error is [Error::InvalidBudget].
pub fn isochrone_from_graph(
    g: &Graph,
    origin: Coordinate,
    options: &Options,
) -> Result<Isochrone, Error> {
    match bounded_dijkstra(g, origin, options.budget) {
        Ok(distances) => Ok(isochrone_from_distances(g, &distances, options)),
        Err(Error::NoReachableOrigin) => {
            log::debug!("no node reachable from {:?} within {} m", origin, options.budget);
            Ok(Isochrone::empty(options.budget))
        }
        Err(e) => Err(e),
    }
}

/// Computes one [Isochrone] for every origin over the same [Graph].
///
/// Origins are snapped with a [KDTree] built once for the whole batch,
/// which is much faster than repeated [isochrone_from_graph] calls on large graphs.
pub fn isochrones_from_graph(
    g: &Graph,
    origins: &[Coordinate],
    options: &Options,
) -> Result<Vec<Isochrone>, Error> {
    check_budget(options.budget)?;

    let Some(tree) = KDTree::from_graph(g) else {
        return Ok(vec![Isochrone::empty(options.budget); origins.len()]);
    };

    origins
        .iter()
        .map(|&origin| {
            let (start, snap_distance) = tree.find_nearest_node(origin);
            match bounded_dijkstra_from_node(g, start, snap_distance, options.budget) {
                Ok(distances) => Ok(isochrone_from_distances(g, &distances, options)),
                Err(Error::NoReachableOrigin) => Ok(Isochrone::empty(options.budget)),
                Err(e) => Err(e),
            }
        })
        .collect()
}

/// Fetches road data around `origin` from a [RoadSource], with the radius set to
/// the distance budget, and computes the [Isochrone] over it.
pub fn isochrone_from_source<S>(
    source: &S,
    origin: Coordinate,
    options: &Options,
) -> Result<Isochrone, Box<dyn StdError>>
where
    S: RoadSource + ?Sized,
    S::Error: StdError + 'static,
{
    check_budget(options.budget)?;
    let segments = source
        .fetch_segments(origin, options.budget)
        .map_err(|e| Box::new(e) as Box<dyn StdError>)?;
    log::debug!("fetched {} segments around {:?}", segments.len(), origin);
    Ok(compute_isochrone(&segments, origin, options)?)
}

fn isochrone_from_distances(g: &Graph, distances: &DistanceMap, options: &Options) -> Isochrone {
    let boundary = extract_boundary(g, distances);
    let hull = build_hull(&boundary.points(), options.hull);

    let mut isochrone = Isochrone {
        boundary: Vec::default(),
        closed: false,
        interior_edges: boundary.interior_edges,
        reached_nodes: distances.len(),
        budget: distances.budget(),
    };

    if hull.is_degenerate() {
        log::debug!(
            "{} reached nodes produced a degenerate hull of {} vertices",
            distances.len(),
            hull.len()
        );
        return isochrone;
    }

    isochrone.closed = hull.closed;
    isochrone.boundary = match options.smooth {
        Some(samples) => smooth_hull(&hull, samples),
        None => hull.vertices,
    };

    log::debug!(
        "isochrone: {} reached nodes, {} boundary points",
        isochrone.reached_nodes,
        isochrone.boundary.len()
    );
    isochrone
}

fn smooth_hull(hull: &Hull, samples: usize) -> Vec<Coordinate> {
    if hull.closed {
        smooth_closed(&hull.vertices, samples)
    } else {
        smooth_open(&hull.vertices, samples)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::{hull::signed_area, MemorySource, EARTH_RADIUS};

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn deg(meters: f64) -> f64 {
        meters / EARTH_RADIUS.to_radians()
    }

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    fn raw(budget: f64, hull: HullStrategy) -> Options {
        Options {
            budget,
            hull,
            smooth: None,
        }
    }

    /// Grid of `n` by `n` nodes spaced `step` meters apart,
    /// with one segment per row and one per column.
    fn grid(n: usize, step: f64) -> Vec<Segment> {
        let at = |row: usize, col: usize| c(deg(row as f64 * step), deg(col as f64 * step));
        let rows = (0..n).map(|row| (0..n).map(|col| at(row, col)).collect());
        let cols = (0..n).map(|col| (0..n).map(|row| at(row, col)).collect());
        rows.chain(cols).collect()
    }

    #[test]
    fn empty_segments_give_empty_isochrone() {
        let iso = compute_isochrone(&[], c(0.0, 0.0), &Options::default()).unwrap();
        assert!(iso.boundary.is_empty());
        assert!(iso.interior_edges.is_empty());
        assert_eq!(iso.reached_nodes, 0);
        assert!(iso.is_empty());
        assert_eq!(iso.polygon(), Err(Error::InsufficientBoundaryPoints(0)));
    }

    #[test]
    fn malformed_input_fails_the_whole_query() {
        let segments = vec![vec![c(0.0, 0.0), c(0.0, 0.001)], vec![c(0.0, 0.002)]];
        assert_eq!(
            compute_isochrone(&segments, c(0.0, 0.0), &Options::default()),
            Err(Error::MalformedInput {
                segment: 1,
                reason: "fewer than 2 coordinates"
            }),
        );
    }

    #[test]
    fn invalid_budget() {
        let options = Options {
            budget: -1.0,
            ..Default::default()
        };
        assert_eq!(
            compute_isochrone(&[], c(0.0, 0.0), &options),
            Err(Error::InvalidBudget(-1.0)),
        );
        assert_eq!(
            isochrones_from_graph(&Graph::new(), &[c(0.0, 0.0)], &options),
            Err(Error::InvalidBudget(-1.0)),
        );
    }

    #[test]
    fn origin_too_far_from_the_network() {
        let segments = vec![vec![c(1.0, 1.0), c(1.0, 1.001)]];
        let iso = compute_isochrone(&segments, c(0.0, 0.0), &Options::default()).unwrap();
        assert_eq!(iso, Isochrone::empty(DEFAULT_BUDGET));
    }

    #[test]
    fn single_edge_keeps_interior_but_no_polygon() {
        let segments = vec![vec![c(0.0, 0.0), c(deg(1000.0), 0.0)]];
        let iso = compute_isochrone(&segments, c(0.0, 0.0), &Options::default()).unwrap();

        // Only the origin and one crossing - not enough for a polygon
        assert_eq!(iso.reached_nodes, 1);
        assert!(iso.boundary.is_empty());
        assert!(!iso.closed);
        assert!(iso.interior_edges.is_empty());
    }

    #[test]
    fn degenerate_hull_keeps_interior_edges() {
        let segments = vec![vec![c(0.0, 0.0), c(deg(100.0), 0.0), c(deg(200.0), 0.0)]];
        let iso = compute_isochrone(&segments, c(0.0, 0.0), &Options::default()).unwrap();

        assert_eq!(iso.reached_nodes, 3);
        assert!(iso.boundary.is_empty());
        assert_eq!(iso.interior_edges.len(), 2);
        assert!(iso.polygon().is_err());
    }

    #[test]
    fn square_convex() {
        let s = deg(100.0);
        let segments = vec![vec![c(0.0, 0.0), c(s, 0.0), c(s, s), c(0.0, s), c(0.0, 0.0)]];
        let iso = compute_isochrone(&segments, c(0.0, 0.0), &raw(150.0, HullStrategy::Convex))
            .unwrap();

        assert_eq!(iso.reached_nodes, 3);
        assert!(iso.closed);
        assert_eq!(iso.interior_edges.len(), 2);

        // Origin, 2 adjacent corners and 2 crossings; diagonal corner is cut off
        assert_eq!(iso.boundary.len(), 5);
        assert!(!iso.boundary.contains(&c(s, s)));
        assert!(signed_area(&iso.boundary) > 0.0);
        assert_eq!(iso.polygon().unwrap().len(), 5);
    }

    #[test]
    fn smoothing_keeps_hull_vertices() {
        let segments = grid(5, 50.0);
        let origin = c(deg(100.0), deg(100.0));

        let hull = compute_isochrone(&segments, origin, &raw(120.0, HullStrategy::Convex)).unwrap();
        let smooth = compute_isochrone(
            &segments,
            origin,
            &Options {
                budget: 120.0,
                hull: HullStrategy::Convex,
                smooth: Some(4),
            },
        )
        .unwrap();

        assert!(hull.boundary.len() >= 3);
        assert_eq!(smooth.boundary.len(), hull.boundary.len() * 4);
        for (i, &v) in hull.boundary.iter().enumerate() {
            assert_eq!(smooth.boundary[i * 4], v);
        }
        assert_eq!(smooth.interior_edges, hull.interior_edges);
    }

    #[test]
    fn open_hull_is_smoothed_as_a_chain() {
        let vertices = vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(1.0, 0.0)];

        let open = smooth_hull(
            &Hull {
                vertices: vertices.clone(),
                closed: false,
            },
            10,
        );
        assert_eq!(open.len(), 31);
        assert_eq!(open.first(), vertices.first());
        assert_eq!(open.last(), vertices.last());

        let closed = smooth_hull(
            &Hull {
                vertices: vertices.clone(),
                closed: true,
            },
            10,
        );
        assert_eq!(closed.len(), 40);
        assert_ne!(closed.last(), vertices.last());
    }

    #[test]
    fn concave_respects_alpha() {
        let segments = grid(9, 10.0);
        let origin = c(deg(40.0), deg(40.0));
        let alpha = 25.0;
        let iso = compute_isochrone(
            &segments,
            origin,
            &raw(35.0, HullStrategy::Concave { alpha }),
        )
        .unwrap();

        assert!(iso.boundary.len() >= 3);
        for pair in iso.boundary.windows(2) {
            assert!(crate::earth_distance(pair[0], pair[1]) < alpha);
        }
        if iso.closed {
            let first = iso.boundary[0];
            let last = iso.boundary[iso.boundary.len() - 1];
            assert!(crate::earth_distance(last, first) < alpha);
        }
    }

    #[test]
    fn is_idempotent() {
        let segments = grid(6, 40.0);
        let origin = c(deg(95.0), deg(105.0));
        for hull in [HullStrategy::Convex, HullStrategy::CONCAVE] {
            let options = Options {
                budget: 130.0,
                hull,
                smooth: Some(DEFAULT_SMOOTHING_SAMPLES),
            };
            let a = compute_isochrone(&segments, origin, &options).unwrap();
            let b = compute_isochrone(&segments, origin, &options).unwrap();

            assert_eq!(a.boundary.len(), b.boundary.len());
            for (p, q) in a.boundary.iter().zip(&b.boundary) {
                assert_eq!(p.lat.to_bits(), q.lat.to_bits());
                assert_eq!(p.lon.to_bits(), q.lon.to_bits());
            }
            assert_eq!(a, b);
        }
    }

    #[test]
    fn batch_matches_single_queries() {
        let segments = grid(6, 40.0);
        let g = Graph::from_segments(&segments).unwrap();
        let options = Options {
            budget: 90.0,
            ..Default::default()
        };
        let origins = [
            c(deg(10.0), deg(5.0)),
            c(deg(120.0), deg(80.0)),
            c(deg(200.0), deg(200.0)),
            c(1.0, 1.0),
        ];

        let batch = isochrones_from_graph(&g, &origins, &options).unwrap();
        assert_eq!(batch.len(), origins.len());
        for (&origin, iso) in origins.iter().zip(&batch) {
            assert_eq!(*iso, isochrone_from_graph(&g, origin, &options).unwrap());
        }
        assert!(batch[3].is_empty());
    }

    #[test]
    fn batch_over_empty_graph() {
        let batch = isochrones_from_graph(&Graph::new(), &[c(0.0, 0.0); 2], &Options::default())
            .unwrap();
        assert_eq!(batch, vec![Isochrone::empty(DEFAULT_BUDGET); 2]);
    }

    #[test]
    fn from_source() {
        let segments = grid(5, 50.0);
        let origin = c(deg(100.0), deg(100.0));
        let options = Options {
            budget: 120.0,
            ..Default::default()
        };

        let source = MemorySource::new(segments.clone());
        let iso = isochrone_from_source(&source, origin, &options).unwrap();
        let expected = compute_isochrone(&segments, origin, &options).unwrap();

        assert_eq!(iso.reached_nodes, expected.reached_nodes);
        assert_eq!(iso.boundary, expected.boundary);
        assert_almost_eq!(iso.budget, 120.0);
    }

    #[test]
    fn from_source_with_nothing_around() {
        let source = |_: Coordinate, _: f64| -> Result<Vec<Segment>, Infallible> { Ok(vec![]) };
        let iso = isochrone_from_source(&source, c(0.0, 0.0), &Options::default()).unwrap();
        assert!(iso.is_empty());
    }

    #[test]
    fn from_source_propagates_source_errors() {
        let source = |_: Coordinate, _: f64| -> Result<Vec<Segment>, std::io::Error> {
            Err(std::io::Error::other("provider unavailable"))
        };
        let err = isochrone_from_source(&source, c(0.0, 0.0), &Options::default()).unwrap_err();
        assert_eq!(err.to_string(), "provider unavailable");
    }
}
