//! Handlers for the `/crews` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use railway_core::error::CoreError;
use railway_core::types::DbId;
use railway_db::models::crew::{CreateCrew, Crew, UpdateCrew};
use railway_db::repositories::CrewRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::CrewListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Crew", id })
}

/// POST /api/v1/crews
pub async fn create(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCrew>,
) -> AppResult<(StatusCode, Json<Crew>)> {
    input.validate()?;
    let crew = CrewRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(crew)))
}

/// GET /api/v1/crews
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<CrewListParams>,
) -> AppResult<Json<DataResponse<Vec<Crew>>>> {
    let crews = CrewRepo::list(&state.pool, &params.filter()).await?;
    Ok(Json(DataResponse { data: crews }))
}

/// GET /api/v1/crews/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Crew>> {
    let crew = CrewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(crew))
}

/// PUT /api/v1/crews/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCrew>,
) -> AppResult<Json<Crew>> {
    input.validate()?;
    let crew = CrewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(crew))
}

/// DELETE /api/v1/crews/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CrewRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
