//! Train entity model, projections and DTOs.

use railway_core::seating::TrainCapacity;
use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::train_type::TrainType;

/// A row from the `trains` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Train {
    pub id: DbId,
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub train_type_id: DbId,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Train {
    pub fn capacity(&self) -> TrainCapacity {
        TrainCapacity::new(self.cargo_num, self.places_in_cargo)
    }
}

/// Train as shown in lists: train type by name, capacity precomputed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainListItem {
    pub id: DbId,
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub capacity: i64,
    pub train_type: String,
    pub image: Option<String>,
}

/// Train with its type expanded.
#[derive(Debug, Clone, Serialize)]
pub struct TrainDetail {
    pub id: DbId,
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub capacity: i64,
    pub train_type: TrainType,
    pub image: Option<String>,
}

impl TrainDetail {
    pub fn new(train: Train, train_type: TrainType) -> Self {
        Self {
            capacity: train.capacity().total(),
            id: train.id,
            name: train.name,
            cargo_num: train.cargo_num,
            places_in_cargo: train.places_in_cargo,
            train_type,
            image: train.image,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrain {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub cargo_num: i32,
    #[validate(range(min = 1))]
    pub places_in_cargo: i32,
    pub train_type_id: DbId,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrain {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub cargo_num: Option<i32>,
    #[validate(range(min = 1))]
    pub places_in_cargo: Option<i32>,
    pub train_type_id: Option<DbId>,
}

/// Filters accepted by the train list. Both are id lists.
#[derive(Debug, Clone, Default)]
pub struct TrainFilter {
    pub ids: Option<Vec<DbId>>,
    pub train_type_ids: Option<Vec<DbId>>,
}
