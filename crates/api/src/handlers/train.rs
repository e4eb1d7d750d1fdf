//! Handlers for the `/trains` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::media::TRAIN_IMAGE_DIR;
use railway_core::types::DbId;
use railway_core::validation::FieldErrors;
use railway_db::models::train::{CreateTrain, TrainDetail, TrainListItem, UpdateTrain};
use railway_db::repositories::{TrainRepo, TrainTypeRepo};
use railway_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::media;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::TrainListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Train", id })
}

async fn check_train_type(pool: &DbPool, train_type_id: DbId) -> AppResult<()> {
    if TrainTypeRepo::find_by_id(pool, train_type_id).await?.is_none() {
        return Err(FieldErrors::single(
            "train_type_id",
            format!("Invalid pk \"{train_type_id}\" - object does not exist."),
        )
        .into());
    }
    Ok(())
}

async fn load_detail(pool: &DbPool, id: DbId) -> AppResult<TrainDetail> {
    TrainRepo::find_detail(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// POST /api/v1/trains
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTrain>,
) -> AppResult<(StatusCode, Json<TrainDetail>)> {
    input.validate()?;
    check_train_type(&state.pool, input.train_type_id).await?;
    let train = TrainRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(load_detail(&state.pool, train.id).await?)))
}

/// GET /api/v1/trains
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<TrainListParams>,
) -> AppResult<Json<DataResponse<Vec<TrainListItem>>>> {
    let trains = TrainRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data: trains }))
}

/// GET /api/v1/trains/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TrainDetail>> {
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// PUT /api/v1/trains/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrain>,
) -> AppResult<Json<TrainDetail>> {
    input.validate()?;
    if let Some(train_type_id) = input.train_type_id {
        check_train_type(&state.pool, train_type_id).await?;
    }
    TrainRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_detail(&state.pool, id).await?))
}

/// DELETE /api/v1/trains/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TrainRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/trains/{id}/upload-image
pub async fn upload_image(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<TrainDetail>> {
    let train = TrainRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let image = media::read_image(&mut multipart).await?;
    let media_root = &state.config.media_root;
    let path = media::store_image(media_root, TRAIN_IMAGE_DIR, &train.name, &image).await?;

    let saved = TrainRepo::set_image(&state.pool, id, &path)
        .await
        .map_err(AppError::from)
        .and_then(|train| train.ok_or_else(|| not_found(id)));
    media::discard_on_error(media_root, &path, saved).await?;
    if let Some(previous) = train.image {
        media::remove_image(media_root, &previous).await;
    }
    Ok(Json(load_detail(&state.pool, id).await?))
}
