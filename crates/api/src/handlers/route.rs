//! Handlers for the `/routes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::geo::haversine_km;
use railway_core::types::DbId;
use railway_core::validation::FieldErrors;
use railway_db::models::route::{CreateRoute, RouteDetail, RouteListItem, UpdateRoute};
use railway_db::models::station::Station;
use railway_db::repositories::{RouteRepo, StationRepo};
use railway_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::RouteListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Route", id })
}

/// Great-circle distance in whole kilometres, at least 1.
fn default_distance(source: &Station, destination: &Station) -> i32 {
    let km = haversine_km(
        source.latitude,
        source.longitude,
        destination.latitude,
        destination.longitude,
    );
    (km.round() as i32).max(1)
}

/// Load a station referenced by `field`, recording a field error if absent.
async fn referenced_station(
    pool: &DbPool,
    field: &str,
    id: DbId,
    errors: &mut FieldErrors,
) -> AppResult<Option<Station>> {
    let station = StationRepo::find_by_id(pool, id).await?;
    if station.is_none() {
        errors.add(field, format!("Invalid pk \"{id}\" - object does not exist."));
    }
    Ok(station)
}

fn check_endpoints_differ(
    source_id: Option<DbId>,
    destination_id: Option<DbId>,
    errors: &mut FieldErrors,
) {
    if let (Some(source), Some(destination)) = (source_id, destination_id) {
        if source == destination {
            errors.add(
                "destination_id",
                "Destination must differ from the source station.",
            );
        }
    }
}

async fn load_detail(pool: &DbPool, id: DbId) -> AppResult<RouteDetail> {
    RouteRepo::find_detail(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// POST /api/v1/routes
///
/// `distance` defaults to the great-circle distance between the stations.
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateRoute>,
) -> AppResult<(StatusCode, Json<RouteDetail>)> {
    input.validate()?;

    let mut errors = FieldErrors::new();
    check_endpoints_differ(Some(input.source_id), Some(input.destination_id), &mut errors);
    let source = referenced_station(&state.pool, "source_id", input.source_id, &mut errors).await?;
    let destination =
        referenced_station(&state.pool, "destination_id", input.destination_id, &mut errors)
            .await?;
    errors.into_result()?;

    let distance = match (input.distance, &source, &destination) {
        (Some(distance), _, _) => distance,
        (None, Some(source), Some(destination)) => default_distance(source, destination),
        (None, _, _) => return Err(AppError::InternalError("route stations vanished".into())),
    };

    let route = RouteRepo::create(&state.pool, &input, distance).await?;
    tracing::info!(route_id = route.id, distance, "Route created");
    Ok((StatusCode::CREATED, Json(load_detail(&state.pool, route.id).await?)))
}

/// GET /api/v1/routes
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<RouteListParams>,
) -> AppResult<Json<DataResponse<Vec<RouteListItem>>>> {
    let routes = RouteRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data: routes }))
}

/// GET /api/v1/routes/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RouteDetail>> {
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// PUT /api/v1/routes/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoute>,
) -> AppResult<Json<RouteDetail>> {
    input.validate()?;

    let mut errors = FieldErrors::new();
    check_endpoints_differ(input.source_id, input.destination_id, &mut errors);
    if let Some(source_id) = input.source_id {
        referenced_station(&state.pool, "source_id", source_id, &mut errors).await?;
    }
    if let Some(destination_id) = input.destination_id {
        referenced_station(&state.pool, "destination_id", destination_id, &mut errors).await?;
    }
    errors.into_result()?;

    RouteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// DELETE /api/v1/routes/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RouteRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
