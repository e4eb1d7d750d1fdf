//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use railway_core::types::{DbId, Timestamp};
use railway_db::models::journey::{CreateJourney, Journey};
use railway_db::models::route::{CreateRoute, Route};
use railway_db::models::station::{CreateStation, Station};
use railway_db::models::train::{CreateTrain, Train};
use railway_db::models::train_type::{SaveTrainType, TrainType};
use railway_db::models::user::{CreateUser, User};
use railway_db::repositories::{
    JourneyRepo, RouteRepo, StationRepo, TrainRepo, TrainTypeRepo, UserRepo,
};
use sqlx::PgPool;

pub async fn station(pool: &PgPool, name: &str, latitude: f64, longitude: f64) -> Station {
    StationRepo::create(
        pool,
        &CreateStation {
            name: name.to_string(),
            latitude,
            longitude,
        },
    )
    .await
    .expect("station insert should succeed")
}

pub async fn route(pool: &PgPool, source: &Station, destination: &Station) -> Route {
    let input = CreateRoute {
        source_id: source.id,
        destination_id: destination.id,
        distance: None,
    };
    RouteRepo::create(pool, &input, 540)
        .await
        .expect("route insert should succeed")
}

pub async fn train_type(pool: &PgPool, name: &str) -> TrainType {
    TrainTypeRepo::create(pool, &SaveTrainType { name: name.to_string() })
        .await
        .expect("train type insert should succeed")
}

pub async fn train(
    pool: &PgPool,
    name: &str,
    cargo_num: i32,
    places_in_cargo: i32,
    train_type: &TrainType,
) -> Train {
    TrainRepo::create(
        pool,
        &CreateTrain {
            name: name.to_string(),
            cargo_num,
            places_in_cargo,
            train_type_id: train_type.id,
        },
    )
    .await
    .expect("train insert should succeed")
}

pub fn at(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
}

pub async fn journey(
    pool: &PgPool,
    route: &Route,
    train: &Train,
    departure_time: Timestamp,
    crew_ids: Vec<DbId>,
) -> Journey {
    JourneyRepo::create(
        pool,
        &CreateJourney {
            route_id: route.id,
            train_id: train.id,
            departure_time,
            arrival_time: departure_time + chrono::Duration::hours(6),
            crew_ids,
        },
    )
    .await
    .expect("journey insert should succeed")
}

pub async fn user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
        },
    )
    .await
    .expect("user insert should succeed")
}

/// Kyiv -> Lviv on a train with 2 cargos of 3 seats each.
pub struct SmallJourney {
    pub journey: Journey,
    pub train: Train,
    pub user: User,
}

pub async fn small_journey(pool: &PgPool) -> SmallJourney {
    let kyiv = station(pool, "Kyiv", 50.4501, 30.5234).await;
    let lviv = station(pool, "Lviv", 49.8397, 24.0297).await;
    let route = route(pool, &kyiv, &lviv).await;
    let kind = train_type(pool, "Intercity").await;
    let train = train(pool, "Hyundai 715", 2, 3, &kind).await;
    let journey = journey(pool, &route, &train, at(20, 8), vec![]).await;
    let user = user(pool, "rider@example.com").await;
    SmallJourney {
        journey,
        train,
        user,
    }
}
