// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::Hull;
use crate::{earth_distance, Coordinate};

/// Computes a distance-bounded concave hull of a set of points.
///
/// Points are ordered counter-clockwise by their polar angle around the centroid
/// (nearer points first on ties), and then walked in that order: a point is kept
/// only if it lies closer than `alpha` meters to the previously kept point.
/// The hull is [closed](Hull::closed) only if the last kept point is also
/// closer than `alpha` to the first one.
///
/// Sparse data may result in fewer than 3 vertices; such a hull is
/// [degenerate](Hull::is_degenerate) and callers should treat it as insufficient data.
/// Fewer than 3 points are returned unchanged.
pub fn concave_hull(points: &[Coordinate], alpha: f64) -> Hull {
    if points.len() < 3 {
        return Hull {
            vertices: points.to_vec(),
            closed: false,
        };
    }

    // Canonical order first, so that the centroid (and thus the result)
    // does not depend on the order of the input points
    let mut unique = points.to_vec();
    unique.sort_by(Coordinate::cmp_lat_lon);
    unique.dedup_by_key(|p| p.key());

    let center = centroid(&unique);
    let mut ordered: Vec<(f64, f64, Coordinate)> = unique
        .iter()
        .map(|&p| {
            let dx = p.lon - center.lon;
            let dy = p.lat - center.lat;
            (dy.atan2(dx), dx * dx + dy * dy, p)
        })
        .collect();

    ordered.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| a.2.cmp_lat_lon(&b.2))
    });

    let mut vertices: Vec<Coordinate> = Vec::with_capacity(ordered.len());
    for (_, _, p) in ordered {
        match vertices.last() {
            Some(&last) if earth_distance(last, p) >= alpha => {}
            _ => vertices.push(p),
        }
    }

    let closed =
        vertices.len() >= 3 && earth_distance(vertices[vertices.len() - 1], vertices[0]) < alpha;

    log::trace!(
        "concave hull: kept {} of {} points (alpha {} m, closed: {})",
        vertices.len(),
        points.len(),
        alpha,
        closed
    );
    Hull { vertices, closed }
}

fn centroid(points: &[Coordinate]) -> Coordinate {
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Coordinate::new(lat / n, lon / n)
}
