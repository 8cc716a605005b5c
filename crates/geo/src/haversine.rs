//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::GeoCoordinate;
use std::f64::consts::PI;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Largest possible great-circle distance (antipodal points), in kilometers.
pub const MAX_DISTANCE_KM: f64 = PI * EARTH_RADIUS_KM;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Total over valid coordinates: the result is finite, non-negative,
/// symmetric and at most [`MAX_DISTANCE_KM`].
///
/// # Example
/// ```
/// use recycling_geo::{distance_km, GeoCoordinate};
///
/// let vila_madalena = GeoCoordinate::new(-23.5505, -46.6833).unwrap();
/// let pinheiros = GeoCoordinate::new(-23.5489, -46.6388).unwrap();
///
/// let distance = distance_km(&vila_madalena, &pinheiros);
/// assert!((distance - 4.6).abs() < 0.1);
/// ```
#[inline]
pub fn distance_km(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn distance_m(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn distance_with_radius(from: &GeoCoordinate, to: &GeoCoordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1 for antipodal pairs.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    let distance = radius * c;

    debug_assert!(
        distance.is_finite() && distance >= 0.0,
        "haversine produced {distance} for {from:?} -> {to:?}"
    );

    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord(lat: f64, lng: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_vila_madalena_to_pinheiros() {
        let a = coord(-23.5505, -46.6833);
        let b = coord(-23.5489, -46.6388);
        let distance = distance_km(&a, &b);
        assert!((distance - 4.6).abs() < 0.1, "Vila Madalena-Pinheiros: {}", distance);
    }

    #[test]
    fn test_berlin_to_paris() {
        let distance = distance_km(&coord(52.5200, 13.4050), &coord(48.8566, 2.3522));
        // Expected: ~878 km
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        let p = coord(-23.5505, -46.6833);
        assert_eq!(distance_km(&p, &p), 0.0);
    }

    #[test]
    fn test_antipodal_is_maximum() {
        let distance = distance_km(&coord(0.0, 0.0), &coord(0.0, 180.0));
        assert!((distance - MAX_DISTANCE_KM).abs() < 1e-6, "antipodal: {}", distance);

        let poles = distance_km(&coord(90.0, 0.0), &coord(-90.0, 0.0));
        assert!((poles - MAX_DISTANCE_KM).abs() < 1e-6);
        assert!(!poles.is_nan());
    }

    #[test]
    fn test_antimeridian_wraparound() {
        let west = coord(0.0, 179.5);
        let east = coord(0.0, -179.5);
        let distance = distance_km(&west, &east);
        // One degree of longitude at the equator
        assert!((distance - 111.19).abs() < 0.1, "antimeridian: {}", distance);
    }

    #[test]
    fn test_meters_conversion() {
        let a = coord(52.5200, 13.4050);
        let b = coord(48.8566, 2.3522);
        assert!((distance_m(&a, &b) - distance_km(&a, &b) * 1000.0).abs() < 1.0);
    }

    fn any_coordinate() -> impl Strategy<Value = GeoCoordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| coord(lat, lng))
    }

    proptest! {
        #[test]
        fn prop_identity(p in any_coordinate()) {
            prop_assert_eq!(distance_km(&p, &p), 0.0);
        }

        #[test]
        fn prop_symmetry(a in any_coordinate(), b in any_coordinate()) {
            let ab = distance_km(&a, &b);
            let ba = distance_km(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-9, "{} != {}", ab, ba);
        }

        #[test]
        fn prop_bounded(a in any_coordinate(), b in any_coordinate()) {
            let d = distance_km(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= MAX_DISTANCE_KM + 1e-9, "{} exceeds bound", d);
        }
    }
}
