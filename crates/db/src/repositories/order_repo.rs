//! Repository for the `orders` and `tickets` tables.
//!
//! Tickets are only ever written through [`OrderRepo::place`], which creates
//! an order and all of its tickets in one transaction or nothing at all.

use std::collections::HashMap;

use railway_core::pagination::Page;
use railway_core::seating::{
    self, BookedExtent, BookedPlaces, JourneySeating, SeatPlace, TrainCapacity,
};
use railway_core::types::DbId;
use railway_core::validation::FieldErrors;
use sqlx::{PgPool, Postgres};

use crate::models::order::{Order, OrderWithTickets};
use crate::models::ticket::{CreateTicket, OrderTicket};

/// Unique constraint on `tickets (journey_id, cargo, seat)`.
pub const TICKET_PLACE_CONSTRAINT: &str = "uq_tickets_journey_cargo_seat";

const ORDER_COLUMNS: &str = "id, user_id, created_at";

const TICKET_SELECT: &str = "SELECT tk.id, tk.order_id, tk.cargo, tk.seat, tk.journey_id,
            s.name || ' -> ' || d.name AS route,
            t.name AS train_name,
            j.departure_time,
            j.arrival_time
     FROM tickets tk
     JOIN journeys j ON j.id = tk.journey_id
     JOIN routes r ON r.id = j.route_id
     JOIN stations s ON s.id = r.source_id
     JOIN stations d ON d.id = r.destination_id
     JOIN trains t ON t.id = j.train_id";

/// A write refused by the booking rules: an order with bad tickets, or a
/// train layout change that would strand tickets already sold.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Field errors; for orders the keys are `tickets[index].field`.
    #[error("Order rejected: {0}")]
    Rejected(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct OrderRepo;

impl OrderRepo {
    /// Create an order for `user_id` holding one ticket per entry of
    /// `tickets`.
    ///
    /// Every journey involved is locked (`FOR UPDATE`) in id order before
    /// its booked places are read, so concurrent orders for the same journey
    /// validate one after another. Its train is share-locked so the layout
    /// cannot shrink before commit. If any ticket fails, the transaction is
    /// rolled back and no order or ticket is persisted. A unique-constraint
    /// hit on insert is reported exactly like a pre-flight conflict.
    pub async fn place(
        pool: &PgPool,
        user_id: DbId,
        tickets: &[CreateTicket],
    ) -> Result<OrderWithTickets, BookingError> {
        if tickets.is_empty() {
            return Err(BookingError::Rejected(FieldErrors::single(
                "tickets",
                "An order must contain at least one ticket.",
            )));
        }

        let mut tx = pool.begin().await?;

        let mut journey_ids: Vec<DbId> = tickets.iter().map(|t| t.journey_id).collect();
        journey_ids.sort_unstable();
        journey_ids.dedup();

        let mut seating: HashMap<DbId, JourneySeating> = HashMap::new();
        for journey_id in journey_ids {
            if let Some(capacity) = Self::lock_journey(&mut tx, journey_id).await? {
                let booked = Self::booked_places(&mut tx, journey_id).await?;
                seating.insert(journey_id, JourneySeating::new(capacity, booked));
            }
        }

        let mut errors = FieldErrors::new();
        for (index, ticket) in tickets.iter().enumerate() {
            let result = match seating.get_mut(&ticket.journey_id) {
                Some(journey) => journey.try_book(ticket.place()),
                None => Err(FieldErrors::single(
                    "journey_id",
                    format!(
                        "Invalid pk \"{}\" - object does not exist.",
                        ticket.journey_id
                    ),
                )),
            };
            if let Err(e) = result {
                errors.merge_prefixed(&format!("tickets[{index}]"), e);
            }
        }
        if !errors.is_empty() {
            tracing::info!(user_id, %errors, "Order rejected");
            return Err(BookingError::Rejected(errors));
        }

        let insert_order =
            format!("INSERT INTO orders (user_id) VALUES ($1) RETURNING {ORDER_COLUMNS}");
        let order = sqlx::query_as::<_, Order>(&insert_order)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        for (index, ticket) in tickets.iter().enumerate() {
            let inserted = sqlx::query(
                "INSERT INTO tickets (cargo, seat, journey_id, order_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(ticket.cargo)
            .bind(ticket.seat)
            .bind(ticket.journey_id)
            .bind(order.id)
            .execute(&mut *tx)
            .await;

            if let Err(err) = inserted {
                if is_ticket_place_violation(&err) {
                    tracing::warn!(
                        user_id,
                        journey_id = ticket.journey_id,
                        cargo = ticket.cargo,
                        seat = ticket.seat,
                        "Ticket place taken concurrently"
                    );
                    let mut errors = FieldErrors::new();
                    errors.merge_prefixed(
                        &format!("tickets[{index}]"),
                        seating::seat_taken_error(ticket.place()),
                    );
                    return Err(BookingError::Rejected(errors));
                }
                return Err(err.into());
            }
        }

        tx.commit().await?;
        tracing::info!(user_id, order_id = order.id, tickets = tickets.len(), "Order placed");

        let tickets = Self::tickets_for_orders(pool, &[order.id]).await?;
        Ok(OrderWithTickets {
            id: order.id,
            created_at: order.created_at,
            tickets,
        })
    }

    /// Orders of one user, newest first, with their tickets.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        page: Page,
    ) -> Result<Vec<OrderWithTickets>, sqlx::Error> {
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let mut by_order: HashMap<DbId, Vec<OrderTicket>> = HashMap::new();
        for ticket in Self::tickets_for_orders(pool, &ids).await? {
            by_order.entry(ticket.order_id).or_default().push(ticket);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderWithTickets {
                tickets: by_order.remove(&order.id).unwrap_or_default(),
                id: order.id,
                created_at: order.created_at,
            })
            .collect())
    }

    /// One order, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<OrderWithTickets>, sqlx::Error> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2");
        let Some(order) = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let tickets = Self::tickets_for_orders(pool, &[order.id]).await?;
        Ok(Some(OrderWithTickets {
            id: order.id,
            created_at: order.created_at,
            tickets,
        }))
    }

    async fn tickets_for_orders(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<Vec<OrderTicket>, sqlx::Error> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("{TICKET_SELECT} WHERE tk.order_id = ANY($1) ORDER BY tk.order_id, tk.id");
        sqlx::query_as::<_, OrderTicket>(&query)
            .bind(order_ids)
            .fetch_all(pool)
            .await
    }

    /// Lock a journey row (and share-lock its train) and return the train
    /// layout, or `None` if the journey does not exist.
    async fn lock_journey(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        journey_id: DbId,
    ) -> Result<Option<TrainCapacity>, sqlx::Error> {
        let row: Option<(i32, i32)> = sqlx::query_as(
            "SELECT t.cargo_num, t.places_in_cargo
             FROM journeys j
             JOIN trains t ON t.id = j.train_id
             WHERE j.id = $1
             FOR UPDATE OF j FOR SHARE OF t",
        )
        .bind(journey_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.map(|(cargo_num, places_in_cargo)| TrainCapacity::new(cargo_num, places_in_cargo)))
    }

    async fn booked_places(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        journey_id: DbId,
    ) -> Result<BookedPlaces, sqlx::Error> {
        let rows: Vec<(i32, i32)> =
            sqlx::query_as("SELECT cargo, seat FROM tickets WHERE journey_id = $1")
                .bind(journey_id)
                .fetch_all(&mut **tx)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(cargo, seat)| SeatPlace::new(cargo, seat))
            .collect())
    }
}

/// Highest cargo and seat sold on any journey run by `train_id`.
pub(crate) async fn booked_extent_for_train(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    train_id: DbId,
) -> Result<Option<BookedExtent>, sqlx::Error> {
    let row: (Option<i32>, Option<i32>) = sqlx::query_as(
        "SELECT MAX(tk.cargo), MAX(tk.seat)
         FROM tickets tk
         JOIN journeys j ON j.id = tk.journey_id
         WHERE j.train_id = $1",
    )
    .bind(train_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(extent(row))
}

/// Highest cargo and seat sold on one journey.
pub(crate) async fn booked_extent_for_journey(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    journey_id: DbId,
) -> Result<Option<BookedExtent>, sqlx::Error> {
    let row: (Option<i32>, Option<i32>) =
        sqlx::query_as("SELECT MAX(cargo), MAX(seat) FROM tickets WHERE journey_id = $1")
            .bind(journey_id)
            .fetch_one(&mut **tx)
            .await?;
    Ok(extent(row))
}

fn extent((max_cargo, max_seat): (Option<i32>, Option<i32>)) -> Option<BookedExtent> {
    max_cargo
        .zip(max_seat)
        .map(|(max_cargo, max_seat)| BookedExtent {
            max_cargo,
            max_seat,
        })
}

/// Whether `err` is a violation of [`TICKET_PLACE_CONSTRAINT`].
pub fn is_ticket_place_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(TICKET_PLACE_CONSTRAINT)
        }
        _ => false,
    }
}
