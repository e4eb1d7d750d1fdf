pub mod auth;
pub mod crew;
pub mod health;
pub mod journey;
pub mod order;
pub mod route;
pub mod station;
pub mod train;
pub mod train_type;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh     public
/// /auth/logout                                   authenticated
/// /users/me                                      authenticated
///
/// /stations, /routes, /train-types,
/// /trains, /journeys, /crews                     list/get: authenticated
///                                                create/update/delete: staff
/// /stations/{id}/upload-image                    staff
/// /trains/{id}/upload-image                      staff
///
/// /orders                                        list, create (caller's own)
/// /orders/{id}                                   get (caller's own)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/stations", station::router())
        .nest("/routes", route::router())
        .nest("/train-types", train_type::router())
        .nest("/trains", train::router())
        .nest("/journeys", journey::router())
        .nest("/crews", crew::router())
        .nest("/orders", order::router())
}
