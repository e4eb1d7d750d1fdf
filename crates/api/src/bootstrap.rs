//! Startup provisioning of the configured staff account.

use railway_db::models::user::{CreateUser, User};
use railway_db::repositories::UserRepo;
use railway_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::StaffBootstrap;
use crate::error::{AppError, AppResult};

/// Create the staff user, or promote an existing account with the same
/// email and reset its password.
pub async fn ensure_staff_user(pool: &DbPool, staff: &StaffBootstrap) -> AppResult<User> {
    let password_hash = hash_password(&staff.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        email: staff.email.clone(),
        password_hash,
        first_name: "Admin".into(),
        last_name: String::new(),
        is_staff: true,
    };
    let user = UserRepo::upsert_staff(pool, &input).await?;
    tracing::info!(user_id = user.id, email = %user.email, "Staff account ensured");
    Ok(user)
}
