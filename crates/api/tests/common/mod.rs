//! Shared harness for the HTTP integration tests.
//!
//! Requests go through [`build_app_router`], so every test exercises the
//! production middleware stack.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use railway_api::auth::jwt::{generate_access_token, JwtConfig};
use railway_api::auth::password::hash_password;
use railway_api::config::ServerConfig;
use railway_api::router::build_app_router;
use railway_api::state::AppState;
use railway_db::models::user::{CreateUser, User};
use railway_db::repositories::UserRepo;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-42";

/// Smallest byte prefixes recognised as each image format.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";
pub const WEBP_BYTES: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";

const MULTIPART_BOUNDARY: &str = "railway-test-boundary";

/// A fresh, per-call media directory under the system temp dir.
fn test_media_root() -> PathBuf {
    std::env::temp_dir().join(format!("railway-media-{}", uuid::Uuid::new_v4()))
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        media_root: test_media_root(),
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        staff_bootstrap: None,
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, email: &str, is_staff: bool) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            is_staff,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, user.is_staff, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a staff account and return its access token.
pub async fn staff_token(pool: &PgPool) -> String {
    let user = create_user(pool, "staff@example.com", true).await;
    token_for(&user)
}

/// Create a regular account and return it with its access token.
pub async fn customer(pool: &PgPool, email: &str) -> (User, String) {
    let user = create_user(pool, email, false).await;
    let token = token_for(&user);
    (user, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
}

fn with_json(builder: axum::http::request::Builder, body: Value) -> Request<Body> {
    builder
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, with_json(request(Method::POST, uri, None), body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, with_json(request(Method::POST, uri, Some(token)), body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, with_json(request(Method::PUT, uri, Some(token)), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// POST a single-file multipart form with the file under `field`.
pub async fn upload(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    data: &[u8],
) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = request(Method::POST, uri, Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect the body as JSON. An empty body yields `Value::Null`.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Catalog fixtures created over HTTP
// ---------------------------------------------------------------------------

/// POST `body` to `uri` as staff and return the created object's id.
pub async fn create_via_api(app: &Router, uri: &str, token: &str, body: Value) -> i64 {
    let response = post_json_auth(app.clone(), uri, token, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "create {uri}: {json}");
    json["id"].as_i64().expect("created object has an id")
}

/// Ids of a Kyiv -> Lviv journey on a 2x3 train.
pub struct Catalog {
    pub source_id: i64,
    pub destination_id: i64,
    pub route_id: i64,
    pub train_type_id: i64,
    pub train_id: i64,
    pub journey_id: i64,
}

pub async fn seed_catalog(app: &Router, staff: &str) -> Catalog {
    let source_id = create_via_api(
        app,
        "/api/v1/stations",
        staff,
        serde_json::json!({ "name": "Kyiv", "latitude": 50.4501, "longitude": 30.5234 }),
    )
    .await;
    let destination_id = create_via_api(
        app,
        "/api/v1/stations",
        staff,
        serde_json::json!({ "name": "Lviv", "latitude": 49.8397, "longitude": 24.0297 }),
    )
    .await;
    let route_id = create_via_api(
        app,
        "/api/v1/routes",
        staff,
        serde_json::json!({ "source_id": source_id, "destination_id": destination_id }),
    )
    .await;
    let train_type_id = create_via_api(
        app,
        "/api/v1/train-types",
        staff,
        serde_json::json!({ "name": "Intercity" }),
    )
    .await;
    let train_id = create_via_api(
        app,
        "/api/v1/trains",
        staff,
        serde_json::json!({
            "name": "Hyundai 715",
            "cargo_num": 2,
            "places_in_cargo": 3,
            "train_type_id": train_type_id,
        }),
    )
    .await;
    let journey_id = create_via_api(
        app,
        "/api/v1/journeys",
        staff,
        serde_json::json!({
            "route_id": route_id,
            "train_id": train_id,
            "departure_time": "2026-10-20T08:00:00Z",
            "arrival_time": "2026-10-20T14:30:00Z",
        }),
    )
    .await;

    Catalog {
        source_id,
        destination_id,
        route_id,
        train_type_id,
        train_id,
        journey_id,
    }
}
