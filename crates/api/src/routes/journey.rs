//! Route definitions for the `/journeys` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::journey;
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
        .route("/", get(journey::list).post(journey::create))
        .route(
            "/{id}",
            get(journey::get_by_id).put(journey::update).delete(journey::delete),
        )
}
