//! Route entity model, projections and DTOs.

use railway_core::filters::IdOrName;
use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::station::Station;

/// A row from the `routes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Route {
    pub id: DbId,
    pub source_id: DbId,
    pub destination_id: DbId,
    pub distance: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Route as shown in lists: station names instead of ids.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RouteListItem {
    pub id: DbId,
    pub source: String,
    pub destination: String,
    pub distance: i32,
}

/// Route with both stations expanded.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDetail {
    pub id: DbId,
    pub source: Station,
    pub destination: Station,
    pub distance: i32,
}

impl RouteDetail {
    /// Short label, e.g. `Kyiv -> Lviv`.
    pub fn label(&self) -> String {
        format!("{} -> {}", self.source.name, self.destination.name)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoute {
    pub source_id: DbId,
    pub destination_id: DbId,
    /// Kilometres. When omitted, the great-circle distance between the two
    /// stations is used.
    #[validate(range(min = 1))]
    pub distance: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoute {
    pub source_id: Option<DbId>,
    pub destination_id: Option<DbId>,
    #[validate(range(min = 1))]
    pub distance: Option<i32>,
}

/// Filters accepted by the route list.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    pub source: Option<IdOrName>,
    pub destination: Option<IdOrName>,
}
