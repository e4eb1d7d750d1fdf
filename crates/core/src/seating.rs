//! Seat allocation rules for tickets.
//!
//! A train is divided into `cargo_num` cargos (cars), each holding
//! `places_in_cargo` seats. A ticket claims exactly one `(cargo, seat)` pair
//! on a journey. Both indices are 1-based.
//!
//! [`validate_ticket`] is a pure check: callers load the pairs already booked
//! on the journey (inside the same transaction as the insert) and pass them
//! in. The storage layer carries a unique constraint on
//! `(journey_id, cargo, seat)` as well, and [`seat_taken_error`] produces the
//! message used for both the pre-flight check and a late constraint hit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

/// Lowest valid cargo and seat index.
pub const FIRST_INDEX: i32 = 1;

/// Field name used for conflict and seat range errors.
pub const SEAT_FIELD: &str = "seat";

/// Field name used for cargo range errors.
pub const CARGO_FIELD: &str = "cargo";

/// Seating layout of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainCapacity {
    pub cargo_num: i32,
    pub places_in_cargo: i32,
}

impl TrainCapacity {
    pub fn new(cargo_num: i32, places_in_cargo: i32) -> Self {
        Self {
            cargo_num,
            places_in_cargo,
        }
    }

    /// Total number of seats on the train.
    pub fn total(&self) -> i64 {
        i64::from(self.cargo_num.max(0)) * i64::from(self.places_in_cargo.max(0))
    }

    /// Seats still free given `booked` tickets, never below zero.
    pub fn available(&self, booked: i64) -> i64 {
        (self.total() - booked).max(0)
    }
}

/// A `(cargo, seat)` pair on a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatPlace {
    pub cargo: i32,
    pub seat: i32,
}

impl SeatPlace {
    pub fn new(cargo: i32, seat: i32) -> Self {
        Self { cargo, seat }
    }
}

/// Pairs already taken on one journey.
#[derive(Debug, Clone, Default)]
pub struct BookedPlaces(HashSet<SeatPlace>);

impl BookedPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, place: SeatPlace) -> bool {
        self.0.contains(&place)
    }

    /// Record `place` as taken. Returns `false` if it already was.
    pub fn insert(&mut self, place: SeatPlace) -> bool {
        self.0.insert(place)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SeatPlace> for BookedPlaces {
    fn from_iter<I: IntoIterator<Item = SeatPlace>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Error set for a pair that is already booked on the journey.
pub fn seat_taken_error(place: SeatPlace) -> FieldErrors {
    FieldErrors::single(
        SEAT_FIELD,
        format!(
            "Seat number {} in cargo {} is already booked",
            place.seat, place.cargo
        ),
    )
}

fn range_message(value: i32, bound_name: &str, max: i32) -> String {
    format!(
        "{value} number must be in available range: ({FIRST_INDEX}, {bound_name}): ({FIRST_INDEX}, {max})"
    )
}

/// Highest cargo and seat numbers among tickets already sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedExtent {
    pub max_cargo: i32,
    pub max_seat: i32,
}

/// Check that a train layout still holds every place already sold on it.
///
/// Errors are keyed by the layout field that is too small.
pub fn check_layout_covers(
    capacity: TrainCapacity,
    extent: BookedExtent,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if capacity.cargo_num < extent.max_cargo {
        errors.add(
            "cargo_num",
            format!(
                "Tickets are already sold in cargo {0}. Ensure this value is at least {0}.",
                extent.max_cargo
            ),
        );
    }
    if capacity.places_in_cargo < extent.max_seat {
        errors.add(
            "places_in_cargo",
            format!(
                "Tickets are already sold for seat {0}. Ensure this value is at least {0}.",
                extent.max_seat
            ),
        );
    }
    errors.into_result()
}

/// Check a requested place against the train layout and the places already
/// booked on the journey.
///
/// Conflicts are reported first; if the pair is free, seat and cargo ranges
/// are both checked and every violation is returned.
pub fn validate_ticket(
    place: SeatPlace,
    capacity: TrainCapacity,
    booked: &BookedPlaces,
) -> Result<(), FieldErrors> {
    if booked.contains(place) {
        return Err(seat_taken_error(place));
    }

    let mut errors = FieldErrors::new();
    if !(FIRST_INDEX..=capacity.places_in_cargo).contains(&place.seat) {
        errors.add(
            SEAT_FIELD,
            range_message(place.seat, "places_in_cargo", capacity.places_in_cargo),
        );
    }
    if !(FIRST_INDEX..=capacity.cargo_num).contains(&place.cargo) {
        errors.add(
            CARGO_FIELD,
            range_message(place.cargo, "cargo_num", capacity.cargo_num),
        );
    }
    errors.into_result()
}

/// Seating state of one journey while a batch of tickets is validated.
///
/// Each accepted place is recorded as booked, so later places in the same
/// batch cannot claim it again.
#[derive(Debug, Clone)]
pub struct JourneySeating {
    pub capacity: TrainCapacity,
    booked: BookedPlaces,
}

impl JourneySeating {
    pub fn new(capacity: TrainCapacity, booked: BookedPlaces) -> Self {
        Self { capacity, booked }
    }

    /// Validate `place` and, if it passes, mark it as booked.
    pub fn try_book(&mut self, place: SeatPlace) -> Result<(), FieldErrors> {
        validate_ticket(place, self.capacity, &self.booked)?;
        self.booked.insert(place);
        Ok(())
    }

    pub fn booked(&self) -> &BookedPlaces {
        &self.booked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_train() -> TrainCapacity {
        TrainCapacity::new(2, 3)
    }

    #[test]
    fn capacity_is_product_of_layout() {
        assert_eq!(small_train().total(), 6);
        assert_eq!(small_train().available(4), 2);
        assert_eq!(small_train().available(10), 0);
    }

    #[test]
    fn every_in_range_free_place_is_accepted() {
        let capacity = TrainCapacity::new(4, 5);
        let booked = BookedPlaces::new();
        for cargo in 1..=4 {
            for seat in 1..=5 {
                assert!(
                    validate_ticket(SeatPlace::new(cargo, seat), capacity, &booked).is_ok(),
                    "cargo {cargo} seat {seat} should be accepted"
                );
            }
        }
    }

    #[test]
    fn seat_outside_range_is_rejected() {
        let booked = BookedPlaces::new();
        for seat in [-1, 0, 4, 100] {
            let errors = validate_ticket(SeatPlace::new(1, seat), small_train(), &booked)
                .unwrap_err();
            let messages = errors.get(SEAT_FIELD).expect("seat error");
            assert_eq!(
                messages[0],
                format!("{seat} number must be in available range: (1, places_in_cargo): (1, 3)")
            );
            assert!(errors.get(CARGO_FIELD).is_none());
        }
    }

    #[test]
    fn cargo_outside_range_is_rejected() {
        let booked = BookedPlaces::new();
        for cargo in [0, 3] {
            let errors = validate_ticket(SeatPlace::new(cargo, 1), small_train(), &booked)
                .unwrap_err();
            assert!(errors.get(CARGO_FIELD).is_some());
            assert!(errors.get(SEAT_FIELD).is_none());
        }
    }

    #[test]
    fn both_ranges_reported_together() {
        let errors =
            validate_ticket(SeatPlace::new(9, 9), small_train(), &BookedPlaces::new()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["cargo", "seat"]);
    }

    #[test]
    fn booked_pair_is_a_conflict() {
        let booked: BookedPlaces = [SeatPlace::new(1, 3)].into_iter().collect();
        let errors = validate_ticket(SeatPlace::new(1, 3), small_train(), &booked).unwrap_err();
        assert_eq!(errors, seat_taken_error(SeatPlace::new(1, 3)));
        assert_eq!(
            errors.get(SEAT_FIELD).unwrap()[0],
            "Seat number 3 in cargo 1 is already booked"
        );
    }

    #[test]
    fn same_seat_in_other_cargo_is_free() {
        let booked: BookedPlaces = [SeatPlace::new(1, 3)].into_iter().collect();
        assert!(validate_ticket(SeatPlace::new(2, 3), small_train(), &booked).is_ok());
    }

    #[test]
    fn scenario_on_two_by_three_train() {
        let capacity = small_train();
        let mut booked = BookedPlaces::new();

        let first = SeatPlace::new(1, 3);
        assert!(validate_ticket(first, capacity, &booked).is_ok());
        booked.insert(first);

        let again = validate_ticket(first, capacity, &booked).unwrap_err();
        assert!(again.get(SEAT_FIELD).unwrap()[0].contains("already booked"));

        let too_far = validate_ticket(SeatPlace::new(1, 4), capacity, &booked).unwrap_err();
        assert!(too_far.get(SEAT_FIELD).unwrap()[0].contains("available range"));
    }

    #[test]
    fn layout_must_cover_sold_places() {
        let sold = BookedExtent {
            max_cargo: 2,
            max_seat: 3,
        };
        assert!(check_layout_covers(small_train(), sold).is_ok());
        assert!(check_layout_covers(TrainCapacity::new(5, 5), sold).is_ok());

        let errors = check_layout_covers(TrainCapacity::new(1, 3), sold).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["cargo_num"]);

        let errors = check_layout_covers(TrainCapacity::new(1, 1), sold).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["cargo_num", "places_in_cargo"]
        );
        assert_eq!(
            errors.get("places_in_cargo").unwrap()[0],
            "Tickets are already sold for seat 3. Ensure this value is at least 3."
        );
    }

    #[test]
    fn seating_rejects_duplicate_within_batch() {
        let mut seating = JourneySeating::new(small_train(), BookedPlaces::new());
        assert!(seating.try_book(SeatPlace::new(1, 1)).is_ok());
        let errors = seating.try_book(SeatPlace::new(1, 1)).unwrap_err();
        assert!(errors.get(SEAT_FIELD).unwrap()[0].contains("already booked"));
        assert_eq!(seating.booked().len(), 1);
    }

    #[test]
    fn rejected_place_is_not_recorded() {
        let mut seating = JourneySeating::new(small_train(), BookedPlaces::new());
        assert!(seating.try_book(SeatPlace::new(1, 7)).is_err());
        assert!(seating.booked().is_empty());
    }

    #[test]
    fn seating_starts_from_persisted_bookings() {
        let booked: BookedPlaces = [SeatPlace::new(1, 1)].into_iter().collect();
        let mut seating = JourneySeating::new(small_train(), booked);
        assert!(seating.try_book(SeatPlace::new(1, 1)).is_err());
        assert!(seating.try_book(SeatPlace::new(1, 2)).is_ok());
        assert!(seating.try_book(SeatPlace::new(2, 1)).is_ok());
        assert_eq!(seating.booked().len(), 3);
    }
}
