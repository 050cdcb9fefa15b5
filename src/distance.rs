// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Coordinate;

/// Radius of the spherical Earth approximation used for all distances, in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Calculates the great-circle distance between two positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in meters.
pub fn earth_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lon1 = a.lon.to_radians();
    let lat2 = b.lat.to_radians();
    let lon2 = b.lon.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    // Rounding may push h slightly above 1 for antipodal points
    EARTH_DIAMETER * h.sqrt().min(1.0).asin()
}

/// Linearly interpolates between two positions in degree space.
/// `fraction` is clamped to `[0, 1]`; 0 returns `a` and 1 returns `b`.
pub fn interpolate(a: Coordinate, b: Coordinate, fraction: f64) -> Coordinate {
    let f = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };

    if f == 0.0 {
        a
    } else if f == 1.0 {
        b
    } else {
        Coordinate {
            lat: a.lat + (b.lat - a.lat) * f,
            lon: a.lon + (b.lon - a.lon) * f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr, $eps:expr) => {
            assert!(
                (($a - $b).abs() < $eps),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    #[test]
    fn earth_distance_known_values() {
        // Centrum and Politechnika metro stations, Warsaw
        let centrum = Coordinate::new(52.2309, 21.0108);
        let politechnika = Coordinate::new(52.2193, 21.0153);
        assert_almost_eq!(earth_distance(centrum, politechnika), 1326.0, 5.0);

        // One degree of latitude
        let d = earth_distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert_almost_eq!(d, EARTH_RADIUS.to_radians() * 1.0, 1e-6);

        assert_eq!(earth_distance(centrum, centrum), 0.0);
    }

    #[test]
    fn earth_distance_is_symmetric() {
        let a = Coordinate::new(39.8971, 32.8421);
        let b = Coordinate::new(39.9012, 32.8503);
        assert_eq!(earth_distance(a, b), earth_distance(b, a));
    }

    #[test]
    fn interpolate_clamps() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(12.0, 24.0);
        assert_eq!(interpolate(a, b, 0.5), Coordinate::new(11.0, 22.0));
        assert_eq!(interpolate(a, b, -1.0), a);
        assert_eq!(interpolate(a, b, 2.0), b);
        assert_eq!(interpolate(a, b, f64::NAN), a);
    }
}
