mod common;

use chrono::{Duration, Utc};
use railway_db::models::session::CreateSession;
use railway_db::models::user::CreateUser;
use railway_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

fn staff(email: &str, password_hash: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        first_name: "Admin".to_string(),
        last_name: String::new(),
        is_staff: true,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn emails_are_case_insensitive(pool: PgPool) {
    let user = common::user(&pool, "Rider@Example.COM").await;
    assert_eq!(user.email, "rider@example.com");
    assert!(!user.is_staff);
    assert!(user.is_active);

    let found = UserRepo::find_by_email(&pool, "RIDER@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "rider@EXAMPLE.com".into(),
            password_hash: "x".into(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_staff_promotes_existing_account(pool: PgPool) {
    let user = common::user(&pool, "admin@example.com").await;

    let promoted = UserRepo::upsert_staff(&pool, &staff("ADMIN@example.com", "new-hash"))
        .await
        .unwrap();
    assert_eq!(promoted.id, user.id);
    assert!(promoted.is_staff);
    assert_eq!(promoted.password_hash, "new-hash");

    let fresh = UserRepo::upsert_staff(&pool, &staff("root@example.com", "hash"))
        .await
        .unwrap();
    assert_ne!(fresh.id, user.id);
    assert_eq!(fresh.first_name, "Admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn record_login_sets_timestamp(pool: PgPool) {
    let user = common::user(&pool, "rider@example.com").await;
    assert!(user.last_login_at.is_none());

    UserRepo::record_login(&pool, user.id).await.unwrap();
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoked_and_expired_sessions_are_inactive(pool: PgPool) {
    let user = common::user(&pool, "rider@example.com").await;
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "live".into(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "stale".into(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "stale")
        .await
        .unwrap()
        .is_none());
    let active = SessionRepo::find_active_by_hash(&pool, "live")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, session.id);

    SessionRepo::revoke(&pool, session.id).await.unwrap();
    assert!(SessionRepo::find_active_by_hash(&pool, "live")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoke_all_counts_only_open_sessions(pool: PgPool) {
    let user = common::user(&pool, "rider@example.com").await;
    for hash in ["a", "b", "c"] {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id: user.id,
                refresh_token_hash: hash.into(),
                expires_at: Utc::now() + Duration::days(1),
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 3);
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 0);
}
