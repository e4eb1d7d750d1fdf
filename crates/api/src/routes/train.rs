//! Route definitions for the `/trains` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::train;
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
        .route("/", get(train::list).post(train::create))
        .route(
            "/{id}",
            get(train::get_by_id).put(train::update).delete(train::delete),
        )
        .route("/{id}/upload-image", post(train::upload_image))
}
