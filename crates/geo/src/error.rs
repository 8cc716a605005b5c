//! Error types for the geo crate.

use crate::catalog::PointId;
use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude or longitude out of range or non-finite
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },

    /// Material tag outside the known set
    #[error("Unknown material type: {0}")]
    UnknownMaterial(String),

    /// Two catalog entries share an id
    #[error("Duplicate collection point id: {0}")]
    DuplicatePointId(PointId),

    /// Collection point accepts nothing
    #[error("Collection point {0} lists no materials")]
    EmptyMaterials(PointId),

    /// An operation needs the user's location and none is known
    #[error("Current location is required for this action")]
    LocationRequired,

    /// Catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Error code for integration with recycling-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Unknown material tag
    UnknownMaterial = 10002,
    /// Duplicate id in catalog
    DuplicatePointId = 10003,
    /// Point without materials
    EmptyMaterials = 10004,
    /// Location not yet acquired
    LocationRequired = 10005,
    /// Catalog IO failure
    Io = 10006,
    /// JSON or TOML parsing
    Parsing = 10007,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate { .. } => GeoErrorCode::InvalidCoordinate,
            GeoError::UnknownMaterial(_) => GeoErrorCode::UnknownMaterial,
            GeoError::DuplicatePointId(_) => GeoErrorCode::DuplicatePointId,
            GeoError::EmptyMaterials(_) => GeoErrorCode::EmptyMaterials,
            GeoError::LocationRequired => GeoErrorCode::LocationRequired,
            GeoError::Io(_) => GeoErrorCode::Io,
            GeoError::JsonError(_) | GeoError::TomlError(_) => GeoErrorCode::Parsing,
        }
    }
}
