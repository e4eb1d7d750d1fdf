//! Repository layer: one `XxxRepo` unit struct per table.
//!
//! Repositories take `&PgPool` (or a transaction) and return `sqlx::Error`;
//! mapping to HTTP responses happens in the API crate. List functions take a
//! filter struct from [`crate::models`] whose active fields are combined
//! with `AND`.

mod crew_repo;
mod journey_repo;
mod order_repo;
mod route_repo;
mod session_repo;
mod station_repo;
mod train_repo;
mod train_type_repo;
mod user_repo;

pub use crew_repo::CrewRepo;
pub use journey_repo::JourneyRepo;
pub use order_repo::{is_ticket_place_violation, BookingError, OrderRepo, TICKET_PLACE_CONSTRAINT};
pub use route_repo::RouteRepo;
pub use session_repo::SessionRepo;
pub use station_repo::StationRepo;
pub use train_repo::TrainRepo;
pub use train_type_repo::TrainTypeRepo;
pub use user_repo::UserRepo;

/// Build an `ILIKE` pattern matching `fragment` anywhere, with LIKE
/// metacharacters in the fragment escaped.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
