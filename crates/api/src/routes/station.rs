//! Route definitions for the `/stations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::station;
use crate::state::AppState;

/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// POST   /{id}/upload-image  -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(station::list).post(station::create))
        .route(
            "/{id}",
            get(station::get_by_id).put(station::update).delete(station::delete),
        )
        .route("/{id}/upload-image", post(station::upload_image))
}
