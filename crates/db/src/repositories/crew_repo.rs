//! Repository for the `crews` table.

use railway_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::contains_pattern;
use crate::models::crew::{CreateCrew, Crew, CrewFilter, UpdateCrew};

const COLUMNS: &str = "id, first_name, last_name, first_name || ' ' || last_name AS full_name, created_at";

pub struct CrewRepo;

impl CrewRepo {
    pub async fn create(pool: &PgPool, input: &CreateCrew) -> Result<Crew, sqlx::Error> {
        let query = format!(
            "INSERT INTO crews (first_name, last_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Crew>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Crew>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM crews WHERE id = $1");
        sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &CrewFilter) -> Result<Vec<Crew>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM crews WHERE TRUE"));
        if let Some(name) = &filter.name {
            let pattern = contains_pattern(name);
            qb.push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY id");
        qb.build_query_as::<Crew>().fetch_all(pool).await
    }

    /// Crew assigned to a journey, ordered by last name.
    pub async fn list_by_journey(pool: &PgPool, journey_id: DbId) -> Result<Vec<Crew>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM crews
             WHERE id IN (SELECT crew_id FROM journey_crews WHERE journey_id = $1)
             ORDER BY last_name, first_name"
        );
        sqlx::query_as::<_, Crew>(&query)
            .bind(journey_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCrew,
    ) -> Result<Option<Crew>, sqlx::Error> {
        let query = format!(
            "UPDATE crews SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Crew>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM crews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
