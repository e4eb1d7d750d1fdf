//! Repository for the `journeys` table and its crew assignments.

use chrono::{Duration, NaiveTime};
use railway_core::filters::IdOrName;
use railway_core::seating::{check_layout_covers, SeatPlace, TrainCapacity};
use railway_core::types::DbId;
use railway_core::validation::FieldErrors;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::contains_pattern;
use super::order_repo::{booked_extent_for_journey, BookingError};
use super::route_repo::push_station_filter;
use crate::models::journey::{
    CreateJourney, Journey, JourneyDetail, JourneyFilter, JourneyListItem, UpdateJourney,
};
use crate::repositories::{CrewRepo, RouteRepo, TrainRepo};

const COLUMNS: &str = "id, route_id, train_id, departure_time, arrival_time, created_at, updated_at";

const LIST_SELECT: &str = "SELECT j.id,
            s.name || ' -> ' || d.name AS route,
            t.name AS train_name,
            t.cargo_num::BIGINT * t.places_in_cargo::BIGINT AS train_capacity,
            j.departure_time,
            j.arrival_time,
            GREATEST(
                t.cargo_num::BIGINT * t.places_in_cargo::BIGINT
                    - (SELECT COUNT(*) FROM tickets tk WHERE tk.journey_id = j.id),
                0
            ) AS tickets_available
     FROM journeys j
     JOIN routes r ON r.id = j.route_id
     JOIN stations s ON s.id = r.source_id
     JOIN stations d ON d.id = r.destination_id
     JOIN trains t ON t.id = j.train_id";

pub struct JourneyRepo;

impl JourneyRepo {
    /// Insert a journey and its crew assignments in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateJourney) -> Result<Journey, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO journeys (route_id, train_id, departure_time, arrival_time)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let journey = sqlx::query_as::<_, Journey>(&query)
            .bind(input.route_id)
            .bind(input.train_id)
            .bind(input.departure_time)
            .bind(input.arrival_time)
            .fetch_one(&mut *tx)
            .await?;

        if !input.crew_ids.is_empty() {
            Self::set_crew_inner(&mut tx, journey.id, &input.crew_ids).await?;
        }

        tx.commit().await?;
        tracing::debug!(journey_id = journey.id, crew = input.crew_ids.len(), "Journey created");
        Ok(journey)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Journey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM journeys WHERE id = $1");
        sqlx::query_as::<_, Journey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a journey with route, train, crew and booked places.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<JourneyDetail>, sqlx::Error> {
        let Some(journey) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let route = RouteRepo::find_detail(pool, journey.route_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let train = TrainRepo::find_detail(pool, journey.train_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let crew = CrewRepo::list_by_journey(pool, id).await?;
        let taken = Self::taken_places(pool, id).await?;
        Ok(Some(JourneyDetail::new(journey, route, train, crew, taken)))
    }

    /// Every `(cargo, seat)` pair sold on the journey.
    pub async fn taken_places(pool: &PgPool, id: DbId) -> Result<Vec<SeatPlace>, sqlx::Error> {
        let rows: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT cargo, seat FROM tickets WHERE journey_id = $1 ORDER BY cargo, seat",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(cargo, seat)| SeatPlace::new(cargo, seat))
            .collect())
    }

    /// List journeys ordered by departure, applying every active filter.
    pub async fn list(
        pool: &PgPool,
        filter: &JourneyFilter,
    ) -> Result<Vec<JourneyListItem>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(LIST_SELECT);
        qb.push(" WHERE TRUE");
        push_station_filter(&mut qb, "r.source_id", "s.name", filter.source.as_ref());
        push_station_filter(&mut qb, "r.destination_id", "d.name", filter.destination.as_ref());
        match &filter.train {
            Some(IdOrName::Id(id)) => {
                qb.push(" AND t.id = ").push_bind(*id);
            }
            Some(IdOrName::Name(name)) => {
                qb.push(" AND t.name ILIKE ").push_bind(contains_pattern(name));
            }
            None => {}
        }
        if let Some(date) = filter.date {
            let start = date.and_time(NaiveTime::MIN).and_utc();
            qb.push(" AND j.departure_time >= ")
                .push_bind(start)
                .push(" AND j.departure_time < ")
                .push_bind(start + Duration::days(1));
        }
        qb.push(" ORDER BY j.departure_time, j.id LIMIT ")
            .push_bind(filter.page.limit)
            .push(" OFFSET ")
            .push_bind(filter.page.offset);
        qb.build_query_as::<JourneyListItem>().fetch_all(pool).await
    }

    /// Update a journey. Only non-`None` fields are applied; `crew_ids`
    /// replaces the whole crew when present.
    ///
    /// Moving the journey to another train is rejected with a `train_id`
    /// field error when that train's layout cannot hold the tickets already
    /// sold on the journey.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJourney,
    ) -> Result<Option<Journey>, BookingError> {
        let mut tx = pool.begin().await?;

        let lock = format!("SELECT {COLUMNS} FROM journeys WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Journey>(&lock)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(train_id) = input.train_id.filter(|&train_id| train_id != current.train_id) {
            Self::check_train_fits(&mut tx, id, train_id).await?;
        }

        let query = format!(
            "UPDATE journeys SET
                route_id = COALESCE($2, route_id),
                train_id = COALESCE($3, train_id),
                departure_time = COALESCE($4, departure_time),
                arrival_time = COALESCE($5, arrival_time),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let journey = sqlx::query_as::<_, Journey>(&query)
            .bind(id)
            .bind(input.route_id)
            .bind(input.train_id)
            .bind(input.departure_time)
            .bind(input.arrival_time)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(ref crew_ids) = input.crew_ids {
            Self::set_crew_inner(&mut tx, journey.id, crew_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(journey))
    }

    /// Delete a journey; its tickets and crew assignments go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM journeys WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Share-lock `train_id` and check its layout against the places sold on
    /// journey `id`. An unknown train is left to the foreign key.
    async fn check_train_fits(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: DbId,
        train_id: DbId,
    ) -> Result<(), BookingError> {
        let layout: Option<(i32, i32)> = sqlx::query_as(
            "SELECT cargo_num, places_in_cargo FROM trains WHERE id = $1 FOR SHARE",
        )
        .bind(train_id)
        .fetch_optional(&mut **tx)
        .await?;
        let Some((cargo_num, places_in_cargo)) = layout else {
            return Ok(());
        };

        let Some(sold) = booked_extent_for_journey(tx, id).await? else {
            return Ok(());
        };
        if check_layout_covers(TrainCapacity::new(cargo_num, places_in_cargo), sold).is_err() {
            tracing::info!(journey_id = id, train_id, "Journey train change rejected");
            return Err(BookingError::Rejected(FieldErrors::single(
                "train_id",
                format!(
                    "Train {train_id} ({cargo_num} cargos of {places_in_cargo} seats) cannot \
                     hold tickets already sold up to cargo {}, seat {}.",
                    sold.max_cargo, sold.max_seat
                ),
            )));
        }
        Ok(())
    }

    async fn set_crew_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        journey_id: DbId,
        crew_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM journey_crews WHERE journey_id = $1")
            .bind(journey_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO journey_crews (journey_id, crew_id)
             SELECT $1, crew_id FROM UNNEST($2::BIGINT[]) AS crew_id
             ON CONFLICT DO NOTHING",
        )
        .bind(journey_id)
        .bind(crew_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
