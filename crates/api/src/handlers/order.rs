//! Handlers for the `/orders` resource.
//!
//! Orders are always scoped to the caller: listing returns only their
//! orders and fetching another user's order is a 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::types::DbId;
use railway_db::models::order::{CreateOrder, OrderWithTickets};
use railway_db::repositories::OrderRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Creates the order and all of its tickets, or nothing. Ticket errors are
/// keyed `tickets[index].field`.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<OrderWithTickets>)> {
    input.validate()?;
    let order = OrderRepo::place(&state.pool, user.user_id, &input.tickets).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/orders
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<OrderWithTickets>>>> {
    let orders = OrderRepo::list_for_user(&state.pool, user.user_id, params.page()).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderWithTickets>> {
    let order = OrderRepo::find_for_user(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;
    Ok(Json(order))
}
