//! Domain logic for the railway ticketing backend.
//!
//! Everything in this crate is pure: no database access, no HTTP. The
//! `railway-db` repositories and `railway-api` handlers call into it.

pub mod error;
pub mod filters;
pub mod geo;
pub mod media;
pub mod pagination;
pub mod schedule;
pub mod seating;
pub mod types;
pub mod validation;
