//! Handlers for the `/train-types` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::types::DbId;
use railway_db::models::train_type::{SaveTrainType, TrainType};
use railway_db::repositories::TrainTypeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::TrainTypeListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TrainType",
        id,
    })
}

/// POST /api/v1/train-types
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<SaveTrainType>,
) -> AppResult<(StatusCode, Json<TrainType>)> {
    input.validate()?;
    let train_type = TrainTypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(train_type)))
}

/// GET /api/v1/train-types
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<TrainTypeListParams>,
) -> AppResult<Json<DataResponse<Vec<TrainType>>>> {
    let train_types = TrainTypeRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data: train_types }))
}

/// GET /api/v1/train-types/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TrainType>> {
    let train_type = TrainTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(train_type))
}

/// PUT /api/v1/train-types/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveTrainType>,
) -> AppResult<Json<TrainType>> {
    input.validate()?;
    let train_type = TrainTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(train_type))
}

/// DELETE /api/v1/train-types/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TrainTypeRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
