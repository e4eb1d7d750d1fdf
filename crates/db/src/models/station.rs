//! Station entity model and DTOs.

use railway_core::filters::StationNameFilter;
use railway_core::geo::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `stations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Station {
    pub id: DbId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Path relative to the media root, if an image was uploaded.
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new station.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStation {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = MIN_LATITUDE, max = MAX_LATITUDE))]
    pub latitude: f64,
    #[validate(range(min = MIN_LONGITUDE, max = MAX_LONGITUDE))]
    pub longitude: f64,
}

/// DTO for updating a station. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStation {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = MIN_LATITUDE, max = MAX_LATITUDE))]
    pub latitude: Option<f64>,
    #[validate(range(min = MIN_LONGITUDE, max = MAX_LONGITUDE))]
    pub longitude: Option<f64>,
}

/// Filters accepted by the station list.
#[derive(Debug, Clone, Default)]
pub struct StationFilter {
    pub name: Option<StationNameFilter>,
}
