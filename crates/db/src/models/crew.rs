//! Crew member model and DTOs.

use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `crews` table, with `full_name` computed in SQL.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Crew {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCrew {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCrew {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,
}

/// Filters accepted by the crew list.
#[derive(Debug, Clone, Default)]
pub struct CrewFilter {
    /// Case-insensitive substring of first or last name.
    pub name: Option<String>,
}
