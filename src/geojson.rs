// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geojson::{Feature, FeatureCollection, Geometry, JsonValue, Position, Value};
use serde_json::json;

use crate::{Coordinate, Isochrone, EARTH_RADIUS};

impl Isochrone {
    /// Converts the isochrone into a [GeoJSON](https://datatracker.ietf.org/doc/html/rfc7946)
    /// `FeatureCollection` with two features:
    ///
    /// 1. the boundary as a `Polygon` (with no coordinates if nothing was reached),
    ///    or as a `LineString` if the boundary is not [closed](Isochrone::closed),
    /// 2. the interior edges as a `MultiLineString`.
    ///
    /// Both carry the `budget` and `reached_nodes` properties.
    pub fn to_geojson(&self) -> FeatureCollection {
        let properties = json!({
            "kind": "boundary",
            "closed": self.closed,
            "budget": self.budget,
            "reached_nodes": self.reached_nodes,
        });

        let boundary = if self.closed || self.boundary.len() < 3 {
            polygon_feature(&self.boundary, properties)
        } else {
            let line = self.boundary.iter().map(|&p| position(p)).collect();
            feature(Value::LineString(line), properties)
        };

        let edges = self
            .interior_edges
            .iter()
            .map(|&(a, b)| vec![position(a), position(b)])
            .collect();

        let interior = feature(
            Value::MultiLineString(edges),
            json!({
                "kind": "interior_edges",
                "budget": self.budget,
                "reached_nodes": self.reached_nodes,
            }),
        );

        FeatureCollection {
            bbox: None,
            features: vec![boundary, interior],
            foreign_members: None,
        }
    }
}

/// Creates a GeoJSON `Feature` with a `Polygon` geometry from an unclosed ring of vertices.
/// The ring is closed by repeating its first vertex. Fewer than 3 vertices
/// result in a polygon without any coordinates.
///
/// `properties` should be a JSON object; anything else is dropped.
pub fn polygon_feature(vertices: &[Coordinate], properties: JsonValue) -> Feature {
    let rings = if vertices.len() < 3 {
        Vec::default()
    } else {
        let ring = vertices
            .iter()
            .chain(vertices.first())
            .map(|&p| position(p))
            .collect();
        vec![ring]
    };

    feature(Value::Polygon(rings), properties)
}

fn feature(value: Value, properties: JsonValue) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: match properties {
            JsonValue::Object(map) => Some(map),
            _ => None,
        },
        foreign_members: None,
    }
}

/// Approximates a circle of `radius` meters around `center` with `segments` vertices,
/// counter-clockwise, starting due east. Useful as a crow-flies reference
/// for a network-constrained [Isochrone].
///
/// Uses the [destination point formula](https://www.movable-type.co.uk/scripts/latlong.html#dest-point)
/// on the same spherical Earth as [earth_distance](crate::earth_distance).
pub fn circle_polygon(center: Coordinate, radius: f64, segments: usize) -> Vec<Coordinate> {
    let lat1 = center.lat.to_radians();
    let lon1 = center.lon.to_radians();
    let delta = radius / EARTH_RADIUS;

    (0..segments)
        .map(|i| {
            // Bearing is measured clockwise from north; walk it backwards from east
            // to get a counter-clockwise ring
            let bearing = std::f64::consts::FRAC_PI_2
                - std::f64::consts::TAU * i as f64 / segments as f64;

            let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
            let lon2 = lon1
                + (bearing.sin() * delta.sin() * lat1.cos())
                    .atan2(delta.cos() - lat1.sin() * lat2.sin());

            Coordinate::new(lat2.to_degrees(), lon2.to_degrees())
        })
        .collect()
}

#[inline]
fn position(p: Coordinate) -> Position {
    vec![p.lon, p.lat]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{earth_distance, hull::signed_area};

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    fn to_json(fc: &FeatureCollection) -> JsonValue {
        serde_json::to_value(fc).unwrap()
    }

    #[test]
    fn isochrone_to_geojson() {
        let iso = Isochrone {
            boundary: vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)],
            closed: true,
            interior_edges: vec![(c(0.0, 0.0), c(0.0, 1.0))],
            reached_nodes: 2,
            budget: 500.0,
        };

        let fc = iso.to_geojson();
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].property("kind"), Some(&json!("boundary")));
        assert_eq!(fc.features[1].property("kind"), Some(&json!("interior_edges")));

        let gj = to_json(&fc);
        assert_eq!(gj["type"], "FeatureCollection");

        let polygon = &gj["features"][0];
        assert_eq!(polygon["type"], "Feature");
        assert_eq!(polygon["geometry"]["type"], "Polygon");
        assert_eq!(polygon["properties"]["budget"], 500.0);
        assert_eq!(polygon["properties"]["reached_nodes"], 2);
        assert_eq!(polygon["properties"]["closed"], true);
        assert_eq!(
            polygon["geometry"]["coordinates"],
            json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]),
        );

        let edges = &gj["features"][1];
        assert_eq!(edges["geometry"]["type"], "MultiLineString");
        assert_eq!(
            edges["geometry"]["coordinates"],
            json!([[[0.0, 0.0], [1.0, 0.0]]]),
        );
    }

    #[test]
    fn open_boundary_is_a_line_string() {
        let iso = Isochrone {
            boundary: vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)],
            closed: false,
            interior_edges: Vec::default(),
            reached_nodes: 3,
            budget: 500.0,
        };

        let boundary = &to_json(&iso.to_geojson())["features"][0];
        assert_eq!(boundary["geometry"]["type"], "LineString");
        assert_eq!(boundary["properties"]["closed"], false);
        assert_eq!(
            boundary["geometry"]["coordinates"],
            json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]),
        );
    }

    #[test]
    fn empty_isochrone_to_geojson() {
        let gj = to_json(&Isochrone::empty(500.0).to_geojson());
        assert_eq!(gj["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(gj["features"][0]["geometry"]["coordinates"], json!([]));
        assert_eq!(gj["features"][1]["geometry"]["coordinates"], json!([]));
        assert_eq!(gj["features"][1]["properties"]["reached_nodes"], 0);
    }

    #[test]
    fn ring_is_closed() {
        let f = polygon_feature(&[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)], json!({}));
        let Some(Geometry {
            value: Value::Polygon(rings),
            ..
        }) = f.geometry
        else {
            panic!("expected a polygon");
        };

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][0], rings[0][3]);
    }

    #[test]
    fn non_object_properties_are_dropped() {
        let f = polygon_feature(&[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)], json!(42));
        assert!(f.properties.is_none());
    }

    #[test]
    fn circle_points_lie_on_the_radius() {
        let center = c(52.2297, 21.0122);
        let circle = circle_polygon(center, 500.0, 64);

        assert_eq!(circle.len(), 64);
        for &p in &circle {
            assert!((earth_distance(center, p) - 500.0).abs() < 1e-6);
        }
        assert!(signed_area(&circle) > 0.0);

        // Starts due east
        assert!((circle[0].lat - center.lat).abs() < 1e-6);
        assert!(circle[0].lon > center.lon);
    }

    #[test]
    fn circle_without_segments() {
        assert!(circle_polygon(c(0.0, 0.0), 500.0, 0).is_empty());
    }
}
