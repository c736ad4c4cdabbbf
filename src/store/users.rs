use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::user::User;

pub async fn create_user(db: &SqlitePool, username: &str, password_hash: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            AppError::Conflict("Username already exists.".into())
        } else {
            e.into()
        }
    })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

pub async fn find_user_by_username(db: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(db)
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = test_pool().await;
        let created = create_user(&db, "alice", "hash").await.unwrap();
        let found = find_user_by_username(&db, "alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = test_pool().await;
        create_user(&db, "alice", "hash").await.unwrap();
        let err = create_user(&db, "alice", "other").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_username_is_none() {
        let db = test_pool().await;
        assert!(find_user_by_username(&db, "nobody").await.unwrap().is_none());
    }
}
