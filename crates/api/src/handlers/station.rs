//! Handlers for the `/stations` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::media::STATION_IMAGE_DIR;
use railway_core::types::DbId;
use railway_db::models::station::{CreateStation, Station, UpdateStation};
use railway_db::repositories::StationRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::media;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::StationListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Station",
        id,
    })
}

/// POST /api/v1/stations
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateStation>,
) -> AppResult<(StatusCode, Json<Station>)> {
    input.validate()?;
    let station = StationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

/// GET /api/v1/stations
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<StationListParams>,
) -> AppResult<Json<DataResponse<Vec<Station>>>> {
    let stations = StationRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data: stations }))
}

/// GET /api/v1/stations/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Station>> {
    let station = StationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(station))
}

/// PUT /api/v1/stations/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStation>,
) -> AppResult<Json<Station>> {
    input.validate()?;
    let station = StationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(station))
}

/// DELETE /api/v1/stations/{id}
///
/// Routes starting or ending here are removed with it.
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/stations/{id}/upload-image
///
/// Multipart form with an `image` field. Replaces any previous image.
pub async fn upload_image(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<Station>> {
    let station = StationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let image = media::read_image(&mut multipart).await?;
    let media_root = &state.config.media_root;
    let path = media::store_image(media_root, STATION_IMAGE_DIR, &station.name, &image).await?;

    let saved = StationRepo::set_image(&state.pool, id, &path)
        .await
        .map_err(AppError::from)
        .and_then(|station| station.ok_or_else(|| not_found(id)));
    let updated = media::discard_on_error(media_root, &path, saved).await?;
    if let Some(previous) = station.image {
        media::remove_image(media_root, &previous).await;
    }
    Ok(Json(updated))
}
