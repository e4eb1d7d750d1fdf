//! Route definitions for the `/crews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::crew;
use crate::state::AppState;

/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(crew::list).post(crew::create))
        .route(
            "/{id}",
            get(crew::get_by_id).put(crew::update).delete(crew::delete),
        )
}
