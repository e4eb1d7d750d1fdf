//! Journey timing helpers.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Display format for departure/arrival times, e.g. `19 October 2026, 02:30 PM`.
pub const DISPLAY_FORMAT: &str = "%d %B %Y, %I:%M %p";

/// Reject a schedule that arrives before it departs.
pub fn validate_schedule(departure: Timestamp, arrival: Timestamp) -> Result<(), CoreError> {
    if arrival < departure {
        return Err(CoreError::Validation(
            "arrival_time must not be earlier than departure_time".into(),
        ));
    }
    Ok(())
}

/// Travel time in fractional hours.
pub fn duration_hours(departure: Timestamp, arrival: Timestamp) -> f64 {
    (arrival - departure).num_seconds() as f64 / 3600.0
}

pub fn format_time(ts: Timestamp) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}
