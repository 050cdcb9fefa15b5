// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Coordinate;

/// Densifies a closed polygon with a uniform
/// [Catmull-Rom spline](https://en.wikipedia.org/wiki/Centripetal_Catmull%E2%80%93Rom_spline)
/// passing through all of its vertices.
///
/// Every edge `v[i] -> v[i+1]` is replaced by `samples_per_edge` points at
/// `t = k / samples_per_edge` for `k` in `0..samples_per_edge`, using
/// `v[i-1]` and `v[i+2]` (wrapping around) as the outer control points.
/// The sample at `t = 0` is always exactly `v[i]`.
///
/// This is purely visual - the curve may bulge outside of the reachable area,
/// and self-intersections of the input are not fixed.
///
/// Polygons with fewer than 3 vertices, and `samples_per_edge == 0`,
/// are returned unchanged.
pub fn smooth_closed(vertices: &[Coordinate], samples_per_edge: usize) -> Vec<Coordinate> {
    let n = vertices.len();
    if n < 3 || samples_per_edge == 0 {
        return vertices.to_vec();
    }

    let mut curve: Vec<Coordinate> = Vec::with_capacity(n * samples_per_edge);
    for i in 0..n {
        let p0 = vertices[(i + n - 1) % n];
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];
        let p3 = vertices[(i + 2) % n];

        if curve.last() != Some(&p1) {
            curve.push(p1);
        }
        for k in 1..samples_per_edge {
            let t = k as f64 / samples_per_edge as f64;
            let p = Coordinate {
                lat: catmull_rom(p0.lat, p1.lat, p2.lat, p3.lat, t),
                lon: catmull_rom(p0.lon, p1.lon, p2.lon, p3.lon, t),
            };
            if curve.last() != Some(&p) {
                curve.push(p);
            }
        }
    }

    // Closing point must not repeat the starting point
    while curve.len() > 1 && curve.last() == curve.first() {
        curve.pop();
    }

    curve
}

/// Densifies an open chain with a uniform Catmull-Rom spline passing through all of its vertices.
///
/// Works like [smooth_closed], except that no curve is drawn between the last and
/// the first vertex, and the end vertices act as their own outer control points.
/// The last vertex is kept as the final point of the result.
///
/// Chains with fewer than 3 vertices, and `samples_per_edge == 0`,
/// are returned unchanged.
pub fn smooth_open(vertices: &[Coordinate], samples_per_edge: usize) -> Vec<Coordinate> {
    let n = vertices.len();
    if n < 3 || samples_per_edge == 0 {
        return vertices.to_vec();
    }

    let mut curve: Vec<Coordinate> = Vec::with_capacity((n - 1) * samples_per_edge + 1);
    for i in 0..n - 1 {
        let p0 = vertices[i.saturating_sub(1)];
        let p1 = vertices[i];
        let p2 = vertices[i + 1];
        let p3 = vertices[(i + 2).min(n - 1)];

        if curve.last() != Some(&p1) {
            curve.push(p1);
        }
        for k in 1..samples_per_edge {
            let t = k as f64 / samples_per_edge as f64;
            let p = Coordinate {
                lat: catmull_rom(p0.lat, p1.lat, p2.lat, p3.lat, t),
                lon: catmull_rom(p0.lon, p1.lon, p2.lon, p3.lon, t),
            };
            if curve.last() != Some(&p) {
                curve.push(p);
            }
        }
    }

    if curve.last() != Some(&vertices[n - 1]) {
        curve.push(vertices[n - 1]);
    }
    curve
}

#[inline]
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    fn square() -> Vec<Coordinate> {
        vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(1.0, 0.0)]
    }

    #[test]
    fn keeps_original_vertices() {
        let hull = square();
        let curve = smooth_closed(&hull, 10);

        assert_eq!(curve.len(), 40);
        for (i, &v) in hull.iter().enumerate() {
            assert_eq!(curve[i * 10], v);
        }
    }

    #[test]
    fn passes_close_to_the_edges() {
        let curve = smooth_closed(&square(), 4);

        // Midpoint of the first edge: bulges outwards (below lat 0) by 1/8 of the side
        let mid = curve[2];
        assert!((mid.lon - 0.5).abs() < 1e-12);
        assert!((mid.lat - -0.125).abs() < 1e-12);
    }

    #[test]
    fn collinear_vertices_stay_on_the_line() {
        let t = catmull_rom(0.0, 1.0, 2.0, 3.0, 0.25);
        assert!((t - 1.25).abs() < 1e-12);
    }

    #[test]
    fn no_consecutive_duplicates() {
        let curve = smooth_closed(&square(), 10);
        for i in 0..curve.len() {
            assert_ne!(curve[i], curve[(i + 1) % curve.len()]);
        }
    }

    #[test]
    fn degenerate_input_is_returned_unchanged() {
        let two = vec![c(0.0, 0.0), c(1.0, 1.0)];
        assert_eq!(smooth_closed(&two, 10), two);
        assert_eq!(smooth_closed(&square(), 0), square());
        assert!(smooth_closed(&[], 10).is_empty());
    }

    #[test]
    fn single_sample_is_identity() {
        assert_eq!(smooth_closed(&square(), 1), square());
        assert_eq!(smooth_open(&square(), 1), square());
    }

    #[test]
    fn open_chain_keeps_vertices_and_ends() {
        let chain = square();
        let curve = smooth_open(&chain, 10);

        assert_eq!(curve.len(), 31);
        for (i, &v) in chain.iter().enumerate() {
            assert_eq!(curve[i * 10], v);
        }
        assert_eq!(curve.first(), chain.first());
        assert_eq!(curve.last(), chain.last());
    }

    #[test]
    fn open_chain_does_not_bridge_the_gap() {
        // Nothing may be sampled between the last vertex (1, 0) and the first one (0, 0)
        let curve = smooth_open(&square(), 4);
        for p in &curve {
            assert!(!(p.lon < 0.25 && p.lat > 0.0 && p.lat < 1.0));
        }
    }

    #[test]
    fn open_chain_with_collinear_ends_stays_on_the_line() {
        let line = vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0)];
        for p in smooth_open(&line, 5) {
            assert_eq!(p.lat, 0.0);
        }
    }
}
