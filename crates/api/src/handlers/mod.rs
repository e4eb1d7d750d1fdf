//! Request handlers, one module per resource.

pub mod auth;
pub mod crew;
pub mod journey;
pub mod order;
pub mod route;
pub mod station;
pub mod train;
pub mod train_type;
pub mod users;
