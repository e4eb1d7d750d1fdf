//! Repository for the `routes` table.

use railway_core::filters::IdOrName;
use railway_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::contains_pattern;
use crate::models::route::{
    CreateRoute, Route, RouteDetail, RouteFilter, RouteListItem, UpdateRoute,
};
use crate::repositories::StationRepo;

const COLUMNS: &str = "id, source_id, destination_id, distance, created_at, updated_at";

/// Joined projection for lists. Expects aliases `r`, `s` (source) and
/// `d` (destination).
const LIST_SELECT: &str = "SELECT r.id, s.name AS source, d.name AS destination, r.distance
     FROM routes r
     JOIN stations s ON s.id = r.source_id
     JOIN stations d ON d.id = r.destination_id";

pub struct RouteRepo;

impl RouteRepo {
    /// Insert a route with an already-resolved distance.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRoute,
        distance: i32,
    ) -> Result<Route, sqlx::Error> {
        let query = format!(
            "INSERT INTO routes (source_id, destination_id, distance)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(input.source_id)
            .bind(input.destination_id)
            .bind(distance)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Route>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM routes WHERE id = $1");
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a route with both stations expanded.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<RouteDetail>, sqlx::Error> {
        let Some(route) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let source = StationRepo::find_by_id(pool, route.source_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let destination = StationRepo::find_by_id(pool, route.destination_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Some(RouteDetail {
            id: route.id,
            source,
            destination,
            distance: route.distance,
        }))
    }

    pub async fn list(
        pool: &PgPool,
        filter: &RouteFilter,
    ) -> Result<Vec<RouteListItem>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(LIST_SELECT);
        qb.push(" WHERE TRUE");
        push_station_filter(&mut qb, "r.source_id", "s.name", filter.source.as_ref());
        push_station_filter(&mut qb, "r.destination_id", "d.name", filter.destination.as_ref());
        qb.push(" ORDER BY r.id");
        qb.build_query_as::<RouteListItem>().fetch_all(pool).await
    }

    /// Update a route. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoute,
    ) -> Result<Option<Route>, sqlx::Error> {
        let query = format!(
            "UPDATE routes SET
                source_id = COALESCE($2, source_id),
                destination_id = COALESCE($3, destination_id),
                distance = COALESCE($4, distance),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .bind(input.source_id)
            .bind(input.destination_id)
            .bind(input.distance)
            .fetch_optional(pool)
            .await
    }

    /// Delete a route and its journeys (cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Append an id-or-name condition on a station column pair.
pub(crate) fn push_station_filter(
    qb: &mut QueryBuilder<'_, Postgres>,
    id_column: &str,
    name_column: &str,
    value: Option<&IdOrName>,
) {
    match value {
        Some(IdOrName::Id(id)) => {
            qb.push(format!(" AND {id_column} = ")).push_bind(*id);
        }
        Some(IdOrName::Name(name)) => {
            qb.push(format!(" AND {name_column} ILIKE "))
                .push_bind(contains_pattern(name));
        }
        None => {}
    }
}
