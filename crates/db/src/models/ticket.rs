//! Ticket model and DTOs.

use railway_core::seating::SeatPlace;
use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub cargo: i32,
    pub seat: i32,
    pub journey_id: DbId,
    pub order_id: DbId,
    pub created_at: Timestamp,
}

/// Ticket as embedded in an order, with a summary of its journey.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderTicket {
    pub id: DbId,
    #[serde(skip)]
    pub order_id: DbId,
    pub cargo: i32,
    pub seat: i32,
    pub journey_id: DbId,
    /// `Source -> Destination` of the journey.
    pub route: String,
    pub train_name: String,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
}

/// One ticket requested as part of an order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTicket {
    #[validate(range(min = 1))]
    pub cargo: i32,
    #[validate(range(min = 1))]
    pub seat: i32,
    pub journey_id: DbId,
}

impl CreateTicket {
    pub fn place(&self) -> SeatPlace {
        SeatPlace::new(self.cargo, self.seat)
    }
}
