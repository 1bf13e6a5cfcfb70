//! Tests for geo_utils module

use supplymatch::geo_utils::*;
use supplymatch::{GeoPoint, SupplyMatchError};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn sample_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::from_degrees(51.5074, -0.1278),
        GeoPoint::from_degrees(48.8566, 2.3522),
        GeoPoint::from_degrees(-33.8688, 151.2093),
        GeoPoint::from_degrees(40.7128, -74.0060),
        GeoPoint::from_degrees(89.9999, 45.0),
        GeoPoint::from_degrees(-90.0, 0.0),
        GeoPoint::from_degrees(0.0, 180.0),
        GeoPoint::from_degrees(0.0, -179.9),
    ]
}

#[test]
fn test_haversine_distance_same_point() {
    let p = GeoPoint::from_degrees(51.5074, -0.1278);
    assert_eq!(haversine_distance(&p, &p, EARTH_RADIUS_KM).unwrap(), 0.0);
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let london = GeoPoint::from_degrees(51.5074, -0.1278);
    let paris = GeoPoint::from_degrees(48.8566, 2.3522);
    let dist = haversine_distance(&london, &paris, EARTH_RADIUS_KM).unwrap();
    assert!(approx_eq(dist, 343.56, 5.0));
}

#[test]
fn test_distance_is_symmetric() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let ab = a.distance_to(b, EARTH_RADIUS_KM).unwrap();
            let ba = b.distance_to(a, EARTH_RADIUS_KM).unwrap();
            assert!(approx_eq(ab, ba, 1e-9), "{:?} <-> {:?}: {} vs {}", a, b, ab, ba);
        }
    }
}

#[test]
fn test_distance_non_negative_and_zero_only_for_same_point() {
    let points = sample_points();
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate() {
            let d = a.distance_to(b, EARTH_RADIUS_KM).unwrap();
            assert!(d >= 0.0);
            if i == j {
                assert_eq!(d, 0.0);
            } else {
                assert!(d > 0.0, "{:?} and {:?} should be apart", a, b);
            }
        }
    }
}

#[test]
fn test_small_distance_precision() {
    // One metre along the equator.
    let a = GeoPoint::from_degrees(0.0, 0.0);
    let b = GeoPoint::from_radians(0.0, 0.001 / EARTH_RADIUS_KM);
    let d = a.distance_to(&b, EARTH_RADIUS_KM).unwrap();
    assert!(approx_eq(d, 0.001, 1e-12));
}

#[test]
fn test_antimeridian_neighbours_are_close() {
    let east = GeoPoint::from_degrees(0.0, 179.9);
    let west = GeoPoint::from_degrees(0.0, -179.9);
    let d = east.distance_to(&west, EARTH_RADIUS_KM).unwrap();
    assert!(approx_eq(d, 22.24, 0.01));
}

#[test]
fn test_distance_scales_with_radius() {
    let a = GeoPoint::from_degrees(10.0, 10.0);
    let b = GeoPoint::from_degrees(20.0, 30.0);
    let unit = a.distance_to(&b, 1.0).unwrap();
    let earth = a.distance_to(&b, EARTH_RADIUS_KM).unwrap();
    assert!(approx_eq(earth, unit * EARTH_RADIUS_KM, 1e-9));
}

#[test]
fn test_invalid_sphere_radius() {
    let a = GeoPoint::from_degrees(0.0, 0.0);
    for radius in [0.0, -1.0, f64::NAN] {
        let err = a.distance_to(&a, radius).unwrap_err();
        assert!(matches!(err, SupplyMatchError::InvalidSphereRadius { .. }));
    }
}

#[test]
fn test_degree_radian_roundtrip() {
    let p = GeoPoint::from_degrees(37.7749, -122.4194);
    let q = GeoPoint::from_radians(p.lat_radians(), p.lon_radians());
    assert!(approx_eq(q.lat_degrees(), 37.7749, 1e-12));
    assert!(approx_eq(q.lon_degrees(), -122.4194, 1e-12));
}
