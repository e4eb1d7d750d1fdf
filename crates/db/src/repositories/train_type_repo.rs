//! Repository for the `train_types` table.

use railway_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::train_type::{SaveTrainType, TrainType, TrainTypeFilter};

const COLUMNS: &str = "id, name, created_at";

pub struct TrainTypeRepo;

impl TrainTypeRepo {
    pub async fn create(pool: &PgPool, input: &SaveTrainType) -> Result<TrainType, sqlx::Error> {
        let query = format!("INSERT INTO train_types (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, TrainType>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrainType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM train_types WHERE id = $1");
        sqlx::query_as::<_, TrainType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &TrainTypeFilter,
    ) -> Result<Vec<TrainType>, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM train_types WHERE TRUE"));
        if let Some(ids) = &filter.ids {
            qb.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
        }
        qb.push(" ORDER BY id");
        qb.build_query_as::<TrainType>().fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveTrainType,
    ) -> Result<Option<TrainType>, sqlx::Error> {
        let query = format!("UPDATE train_types SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, TrainType>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a train type together with its trains (cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM train_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
