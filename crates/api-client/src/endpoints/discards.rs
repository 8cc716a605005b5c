//! Discard logging and listing endpoints

use crate::client::RecyclingClient;
use crate::error::ApiResult;
use chrono::NaiveDateTime;
use recycling_geo::{GeoCoordinate, GeoError, MaterialType};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Points the backend credits to a user for each logged discard
pub const POINTS_PER_DISCARD: u32 = 10;

/// Discards API interface
#[derive(Clone)]
pub struct DiscardsApi {
    client: RecyclingClient,
}

impl DiscardsApi {
    pub(crate) fn new(client: RecyclingClient) -> Self {
        Self { client }
    }

    /// Log a discard; the backend credits [`POINTS_PER_DISCARD`] to the user
    pub async fn log(&self, discard: &NewDiscard) -> ApiResult<CreatedDiscard> {
        let created: CreatedDiscard = self.client.post("discards", discard).await?;
        info!(
            discard_id = created.discard_id,
            user_id = discard.user_id,
            material = %discard.material_type,
            "Discard logged"
        );
        Ok(created)
    }

    /// Every discard logged by the community
    pub async fn community(&self) -> ApiResult<Vec<DiscardRecord>> {
        self.client.get("community_discards").await
    }

    /// Discards logged by one user
    pub async fn for_user(&self, user_id: u64) -> ApiResult<Vec<DiscardRecord>> {
        self.client.users().discards(user_id).await
    }
}

/// Discard form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDiscard {
    /// User logging the discard
    pub user_id: u64,
    /// Material discarded
    pub material_type: MaterialType,
    /// Free-text quantity, e.g. "2 kg"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Free-text place description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_manual: Option<String>,
    /// GPS latitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_gps_lat: Option<f64>,
    /// GPS longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_gps_lon: Option<f64>,
}

impl NewDiscard {
    /// Create a discard with only the required fields
    pub fn new(user_id: u64, material_type: MaterialType) -> Self {
        Self {
            user_id,
            material_type,
            quantity: None,
            location_manual: None,
            location_gps_lat: None,
            location_gps_lon: None,
        }
    }

    /// Set the quantity
    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Set a manual location description
    #[must_use]
    pub fn with_location_manual(mut self, location: impl Into<String>) -> Self {
        self.location_manual = Some(location.into());
        self
    }

    /// Attach a GPS fix
    #[must_use]
    pub fn with_gps(mut self, at: GeoCoordinate) -> Self {
        self.location_gps_lat = Some(at.latitude());
        self.location_gps_lon = Some(at.longitude());
        self
    }
}

/// Response to a logged discard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDiscard {
    /// Confirmation message
    pub message: String,
    /// Identifier assigned by the backend
    pub discard_id: u64,
}

/// A discard as listed by the backend
///
/// `user_id` is only present in the community listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscardRecord {
    /// Identifier
    pub id: u64,
    /// Owner, when listed community-wide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Material tag as stored by the backend
    pub material_type: String,
    /// Free-text quantity
    pub quantity: Option<String>,
    /// Free-text place description
    pub location_manual: Option<String>,
    /// GPS latitude
    pub location_gps_lat: Option<f64>,
    /// GPS longitude
    pub location_gps_lon: Option<f64>,
    /// When the discard was logged (backend local time)
    pub timestamp: NaiveDateTime,
}

impl DiscardRecord {
    /// Parsed material tag
    ///
    /// # Errors
    /// `GeoError::UnknownMaterial` for tags outside the known set.
    pub fn material(&self) -> Result<MaterialType, GeoError> {
        self.material_type.parse()
    }

    /// Validated GPS fix, if both components were recorded
    ///
    /// # Errors
    /// `GeoError::InvalidCoordinate` when the stored pair is out of range.
    pub fn gps(&self) -> Result<Option<GeoCoordinate>, GeoError> {
        match (self.location_gps_lat, self.location_gps_lon) {
            (Some(lat), Some(lng)) => GeoCoordinate::new(lat, lng).map(Some),
            _ => Ok(None),
        }
    }
}
