use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::models::user::{Credentials, Session, User};
use crate::store::users::{create_user, find_user_by_username};

pub async fn register(db: &SqlitePool, creds: &Credentials) -> AppResult<User> {
    creds.validate()?;

    if find_user_by_username(db, &creds.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists.".into()));
    }

    let pwd_hash = hash_password(&creds.password)?;
    create_user(db, &creds.username, &pwd_hash).await
}

/// Unknown usernames and wrong passwords both come back as `Unauthorized`.
pub async fn login(db: &SqlitePool, creds: &Credentials) -> AppResult<Session> {
    let user = find_user_by_username(db, &creds.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&creds.password, &user.password_hash)? {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(user.into())
}
