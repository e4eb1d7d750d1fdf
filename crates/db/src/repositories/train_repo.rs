//! Repository for the `trains` table.

use railway_core::seating::{check_layout_covers, TrainCapacity};
use railway_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::order_repo::{booked_extent_for_train, BookingError};
use crate::models::train::{
    CreateTrain, Train, TrainDetail, TrainFilter, TrainListItem, UpdateTrain,
};
use crate::repositories::TrainTypeRepo;

const COLUMNS: &str =
    "id, name, cargo_num, places_in_cargo, train_type_id, image, created_at, updated_at";

const LIST_SELECT: &str = "SELECT t.id, t.name, t.cargo_num, t.places_in_cargo,
            t.cargo_num::BIGINT * t.places_in_cargo::BIGINT AS capacity,
            tt.name AS train_type, t.image
     FROM trains t
     JOIN train_types tt ON tt.id = t.train_type_id";

pub struct TrainRepo;

impl TrainRepo {
    pub async fn create(pool: &PgPool, input: &CreateTrain) -> Result<Train, sqlx::Error> {
        let query = format!(
            "INSERT INTO trains (name, cargo_num, places_in_cargo, train_type_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Train>(&query)
            .bind(&input.name)
            .bind(input.cargo_num)
            .bind(input.places_in_cargo)
            .bind(input.train_type_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Train>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trains WHERE id = $1");
        sqlx::query_as::<_, Train>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a train with its type expanded.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TrainDetail>, sqlx::Error> {
        let Some(train) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let train_type = TrainTypeRepo::find_by_id(pool, train.train_type_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(Some(TrainDetail::new(train, train_type)))
    }

    pub async fn list(pool: &PgPool, filter: &TrainFilter) -> Result<Vec<TrainListItem>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(LIST_SELECT);
        qb.push(" WHERE TRUE");
        if let Some(ids) = &filter.ids {
            qb.push(" AND t.id = ANY(").push_bind(ids.clone()).push(")");
        }
        if let Some(type_ids) = &filter.train_type_ids {
            qb.push(" AND t.train_type_id = ANY(")
                .push_bind(type_ids.clone())
                .push(")");
        }
        qb.push(" ORDER BY t.id");
        qb.build_query_as::<TrainListItem>().fetch_all(pool).await
    }

    /// Update a train. Only non-`None` fields in `input` are applied.
    ///
    /// The train row is locked while the new layout is checked against every
    /// ticket sold on its journeys. A layout too small for them is rejected
    /// with `cargo_num`/`places_in_cargo` field errors.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrain,
    ) -> Result<Option<Train>, BookingError> {
        let mut tx = pool.begin().await?;

        let lock = format!("SELECT {COLUMNS} FROM trains WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Train>(&lock)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let layout = TrainCapacity::new(
            input.cargo_num.unwrap_or(current.cargo_num),
            input.places_in_cargo.unwrap_or(current.places_in_cargo),
        );
        if layout != current.capacity() {
            if let Some(sold) = booked_extent_for_train(&mut tx, id).await? {
                if let Err(errors) = check_layout_covers(layout, sold) {
                    tracing::info!(train_id = id, %errors, "Train layout change rejected");
                    return Err(BookingError::Rejected(errors));
                }
            }
        }

        let query = format!(
            "UPDATE trains SET
                name = COALESCE($2, name),
                cargo_num = COALESCE($3, cargo_num),
                places_in_cargo = COALESCE($4, places_in_cargo),
                train_type_id = COALESCE($5, train_type_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let train = sqlx::query_as::<_, Train>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.cargo_num)
            .bind(input.places_in_cargo)
            .bind(input.train_type_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(train))
    }

    pub async fn set_image(
        pool: &PgPool,
        id: DbId,
        image: &str,
    ) -> Result<Option<Train>, sqlx::Error> {
        let query = format!(
            "UPDATE trains SET image = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Train>(&query)
            .bind(id)
            .bind(image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a train and its journeys (cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trains WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
