//! Train type entity model and DTOs.

use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `train_types` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TrainType {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating or renaming a train type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveTrainType {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Filters accepted by the train type list.
#[derive(Debug, Clone, Default)]
pub struct TrainTypeFilter {
    pub ids: Option<Vec<DbId>>,
}
