// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;

use super::cross;
use crate::Coordinate;

/// Computes the convex hull of a set of points using the
/// [Graham scan](https://en.wikipedia.org/wiki/Graham_scan), treating
/// longitude as x and latitude as y.
///
/// The result starts at the point with the lowest (lat, lon) and runs counter-clockwise.
/// Collinear points on hull edges are dropped. Duplicated input points are ignored.
///
/// Fewer than 3 points are returned unchanged. If all points are collinear,
/// only the two extreme points are returned.
pub fn convex_hull(points: &[Coordinate]) -> Vec<Coordinate> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut points = points.to_vec();
    points.sort_by(Coordinate::cmp_lat_lon);
    points.dedup_by_key(|p| p.key());
    if points.len() < 3 {
        return points;
    }

    // After sorting, the pivot (lowest lat, then lowest lon) is first.
    // Every other point lies at a polar angle within [0, π) around it.
    let pivot = points[0];
    points[1..].sort_by(|&a, &b| by_polar_angle(pivot, a, b));

    let mut hull: Vec<Coordinate> = Vec::with_capacity(points.len());
    for p in points {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    hull
}

/// Orders points by their polar angle around `pivot`, nearer points first on ties.
fn by_polar_angle(pivot: Coordinate, a: Coordinate, b: Coordinate) -> Ordering {
    let turn = cross(pivot, a, b);
    if turn > 0.0 {
        Ordering::Less
    } else if turn < 0.0 {
        Ordering::Greater
    } else {
        squared_distance(pivot, a).total_cmp(&squared_distance(pivot, b))
    }
}

#[inline]
fn squared_distance(a: Coordinate, b: Coordinate) -> f64 {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    dx * dx + dy * dy
}
