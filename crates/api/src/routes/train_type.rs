//! Route definitions for the `/train-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::train_type;
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
        .route("/", get(train_type::list).post(train_type::create))
        .route(
            "/{id}",
            get(train_type::get_by_id).put(train_type::update).delete(train_type::delete),
        )
}
