//! Order model and DTOs.

use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::ticket::{CreateTicket, OrderTicket};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// An order together with its tickets.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithTickets {
    pub id: DbId,
    pub created_at: Timestamp,
    pub tickets: Vec<OrderTicket>,
}

/// Request body for placing an order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrder {
    #[validate(length(min = 1, message = "An order must contain at least one ticket."), nested)]
    pub tickets: Vec<CreateTicket>,
}
