//! Journey entity model, projections and DTOs.

use chrono::NaiveDate;
use railway_core::filters::IdOrName;
use railway_core::pagination::Page;
use railway_core::schedule;
use railway_core::seating::SeatPlace;
use railway_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::crew::Crew;
use crate::models::route::RouteDetail;
use crate::models::train::TrainDetail;

/// A row from the `journeys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Journey {
    pub id: DbId,
    pub route_id: DbId,
    pub train_id: DbId,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Journey as shown in lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JourneyListItem {
    pub id: DbId,
    /// `Source -> Destination`.
    pub route: String,
    pub train_name: String,
    pub train_capacity: i64,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    /// Capacity minus tickets sold.
    pub tickets_available: i64,
}

/// Journey with route, train and crew expanded, plus booked places.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyDetail {
    pub id: DbId,
    pub route: RouteDetail,
    pub train: TrainDetail,
    pub crew: Vec<Crew>,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    pub formatted_departure_time: String,
    pub formatted_arrival_time: String,
    pub duration_hours: f64,
    pub tickets_available: i64,
    pub taken_places: Vec<SeatPlace>,
}

impl JourneyDetail {
    pub fn new(
        journey: Journey,
        route: RouteDetail,
        train: TrainDetail,
        crew: Vec<Crew>,
        taken_places: Vec<SeatPlace>,
    ) -> Self {
        let tickets_available = (train.capacity - taken_places.len() as i64).max(0);
        Self {
            id: journey.id,
            route,
            train,
            crew,
            formatted_departure_time: schedule::format_time(journey.departure_time),
            formatted_arrival_time: schedule::format_time(journey.arrival_time),
            duration_hours: schedule::duration_hours(journey.departure_time, journey.arrival_time),
            departure_time: journey.departure_time,
            arrival_time: journey.arrival_time,
            tickets_available,
            taken_places,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJourney {
    pub route_id: DbId,
    pub train_id: DbId,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    #[serde(default)]
    pub crew_ids: Vec<DbId>,
}

/// DTO for updating a journey. `crew_ids`, when present, replaces the crew.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJourney {
    pub route_id: Option<DbId>,
    pub train_id: Option<DbId>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub crew_ids: Option<Vec<DbId>>,
}

/// Filters accepted by the journey list.
#[derive(Debug, Clone, Default)]
pub struct JourneyFilter {
    pub source: Option<IdOrName>,
    pub destination: Option<IdOrName>,
    pub train: Option<IdOrName>,
    /// UTC calendar day of departure.
    pub date: Option<NaiveDate>,
    pub page: Page,
}
