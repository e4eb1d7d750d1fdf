//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - List/detail projections where the API shapes them differently
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod crew;
pub mod journey;
pub mod order;
pub mod route;
pub mod session;
pub mod station;
pub mod ticket;
pub mod train;
pub mod train_type;
pub mod user;
