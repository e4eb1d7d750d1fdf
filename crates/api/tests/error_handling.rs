//! Error response shapes produced by `AppError` and the middleware stack.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, upload};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn not_found_has_code_and_message(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    for (uri, entity) in [
        ("/api/v1/routes/424242", "Route"),
        ("/api/v1/trains/424242", "Train"),
        ("/api/v1/train-types/424242", "TrainType"),
        ("/api/v1/crews/424242", "Crew"),
        ("/api/v1/orders/424242", "Order"),
    ] {
        let response = get_auth(app.clone(), uri, &staff).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["error"], format!("{entity} with id 424242 not found"));
        assert!(json.get("fields").is_none());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_of_missing_rows_are_404(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/stations/777",
        &staff,
        json!({ "name": "Ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, "/api/v1/journeys/777", &staff).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_is_conflict(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({ "name": "Intercity" });
    let response = post_json_auth(app.clone(), "/api/v1/train-types", &staff, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/train-types", &staff, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("uq_train_types_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validation_errors_list_every_field(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/crews",
        &staff,
        json!({ "first_name": "", "last_name": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid input");
    assert!(json["fields"]["first_name"].is_array());
    assert!(json["fields"]["last_name"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_body_is_rejected(pool: PgPool) {
    let staff = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);
    let station = common::create_via_api(
        &app,
        "/api/v1/stations",
        &staff,
        json!({ "name": "Kyiv", "latitude": 50.45, "longitude": 30.52 }),
    )
    .await;

    let too_big = vec![0u8; 2 * 1024 * 1024];
    let uri = format!("/api/v1/stations/{station}/upload-image");
    let response = upload(app, &uri, &staff, "image", "huge.png", &too_big).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
