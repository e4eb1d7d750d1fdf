//! Handlers for the `/journeys` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::schedule::validate_schedule;
use railway_core::types::DbId;
use railway_core::validation::FieldErrors;
use railway_db::models::journey::{CreateJourney, JourneyDetail, JourneyListItem, UpdateJourney};
use railway_db::repositories::{JourneyRepo, RouteRepo, TrainRepo};
use railway_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::JourneyListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Journey",
        id,
    })
}

fn missing(field: &str, id: DbId, errors: &mut FieldErrors) {
    errors.add(field, format!("Invalid pk \"{id}\" - object does not exist."));
}

/// Verify the route and train a journey points at exist.
async fn check_references(
    pool: &DbPool,
    route_id: Option<DbId>,
    train_id: Option<DbId>,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if let Some(route_id) = route_id {
        if RouteRepo::find_by_id(pool, route_id).await?.is_none() {
            missing("route_id", route_id, &mut errors);
        }
    }
    if let Some(train_id) = train_id {
        if TrainRepo::find_by_id(pool, train_id).await?.is_none() {
            missing("train_id", train_id, &mut errors);
        }
    }
    Ok(errors.into_result()?)
}

async fn load_detail(pool: &DbPool, id: DbId) -> AppResult<JourneyDetail> {
    JourneyRepo::find_detail(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// POST /api/v1/journeys
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateJourney>,
) -> AppResult<(StatusCode, Json<JourneyDetail>)> {
    input.validate()?;
    validate_schedule(input.departure_time, input.arrival_time)?;
    check_references(&state.pool, Some(input.route_id), Some(input.train_id)).await?;

    let journey = JourneyRepo::create(&state.pool, &input).await?;
    tracing::info!(journey_id = journey.id, "Journey created");
    Ok((StatusCode::CREATED, Json(load_detail(&state.pool, journey.id).await?)))
}

/// GET /api/v1/journeys
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<JourneyListParams>,
) -> AppResult<Json<DataResponse<Vec<JourneyListItem>>>> {
    let filter = params.filter()?;
    let journeys = JourneyRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: journeys }))
}

/// GET /api/v1/journeys/{id}
///
/// Includes crew and the `(cargo, seat)` pairs already sold.
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<JourneyDetail>> {
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// PUT /api/v1/journeys/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJourney>,
) -> AppResult<Json<JourneyDetail>> {
    input.validate()?;
    let current = JourneyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    validate_schedule(
        input.departure_time.unwrap_or(current.departure_time),
        input.arrival_time.unwrap_or(current.arrival_time),
    )?;
    check_references(&state.pool, input.route_id, input.train_id).await?;

    JourneyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// DELETE /api/v1/journeys/{id}
///
/// Tickets sold on the journey are deleted with it.
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if JourneyRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
