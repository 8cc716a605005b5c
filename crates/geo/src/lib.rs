//! Proximity ranking for recycling collection points.
//!
//! This crate provides:
//! - Validated geographic coordinates
//! - Haversine distance calculations
//! - A catalog of collection points and the materials they accept
//! - Distance-sorted ranking with deterministic tie-breaks
//! - An asynchronous location acquisition session
//! - External map and directions links
//!
//! # Example
//!
//! ```
//! use recycling_geo::{rank, Catalog, GeoCoordinate};
//!
//! let catalog = Catalog::demo();
//! let user = GeoCoordinate::new(-23.5489, -46.6388).unwrap(); // Pinheiros
//!
//! let ranking = rank(Some(&user), catalog.all());
//! let nearest = ranking.ranked().unwrap().first().unwrap();
//! assert_eq!(nearest.point.name, "Ecoponto Pinheiros");
//! ```

mod error;
mod haversine;
mod material;
pub mod catalog;
pub mod links;
pub mod location;
pub mod ranker;

pub use catalog::{Catalog, CollectionPoint, PointId};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance_km, distance_m, EARTH_RADIUS_KM, EARTH_RADIUS_M, MAX_DISTANCE_KM};
pub use location::{
    AcquisitionError, FixedLocation, LocationProvider, LocationSession, LocationState, NoLocation,
    RequestError, DEFAULT_ACQUISITION_TIMEOUT,
};
pub use material::MaterialType;
pub use ranker::{nearest, rank, within_radius, RankedPoint, Ranking, DISTANCE_EPSILON_KM};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated geographic coordinate.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180],
/// both finite. Construction through [`GeoCoordinate::new`] is the only
/// way in, including deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidCoordinate`] when either value is
    /// non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !Self::is_valid(latitude, longitude) {
            return Err(GeoError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Returns true if the pair would make a valid coordinate.
    #[inline]
    pub fn is_valid(latitude: f64, longitude: f64) -> bool {
        latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
    }

    /// Latitude in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl TryFrom<(f64, f64)> for GeoCoordinate {
    type Error = GeoError;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self> {
        Self::new(lat, lng)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Wire form of a coordinate: `{"lat": .., "lng": ..}`.
#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.lat, raw.lng)
    }
}

impl From<GeoCoordinate> for RawCoordinate {
    fn from(coord: GeoCoordinate) -> Self {
        Self {
            lat: coord.latitude,
            lng: coord.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = GeoCoordinate::new(-23.5505, -46.6833).unwrap();
        assert_eq!(coord.latitude(), -23.5505);
        assert_eq!(coord.longitude(), -46.6833);
    }

    #[test]
    fn test_coordinate_bounds_inclusive() {
        assert!(GeoCoordinate::new(0.0, 0.0).is_ok());
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
        assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = GeoCoordinate::new(91.0, 0.0).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate { .. }));

        let err = GeoCoordinate::new(0.0, 200.0).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);

        assert!(GeoCoordinate::new(-90.5, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, -180.01).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
        assert!(GeoCoordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: GeoCoordinate = (52.5200, 13.4050).try_into().unwrap();
        assert_eq!(coord.latitude(), 52.5200);
        assert!(GeoCoordinate::try_from((95.0, 0.0)).is_err());
    }

    #[test]
    fn test_serde_wire_form() {
        let coord = GeoCoordinate::new(-23.5489, -46.6388).unwrap();
        let json = serde_json::to_value(coord).unwrap();
        assert_eq!(json, serde_json::json!({"lat": -23.5489, "lng": -46.6388}));

        let back: GeoCoordinate = serde_json::from_value(json).unwrap();
        assert_eq!(back, coord);
    }

    #[test]
    fn test_deserialize_validates() {
        let result: std::result::Result<GeoCoordinate, _> =
            serde_json::from_str(r#"{"lat": 91.0, "lng": 0.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let coord = GeoCoordinate::new(-23.55051, -46.68329).unwrap();
        assert_eq!(coord.to_string(), "-23.5505, -46.6833");
    }
}
