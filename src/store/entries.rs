use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::entry::{EntryInput, EntryRow, MoodEntry, DATE_FORMAT};

pub async fn create_entry(
    db: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
    input: &EntryInput,
) -> AppResult<MoodEntry> {
    input.check()?;

    let row = sqlx::query_as::<_, EntryRow>(
        r#"
        INSERT INTO entries (user_id, entry_date, mood, sleep_hours, stress_level, anxiety_level)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(date.format(DATE_FORMAT).to_string())
    .bind(i64::from(input.mood))
    .bind(input.sleep_hours)
    .bind(i64::from(input.stress_level))
    .bind(i64::from(input.anxiety_level))
    .fetch_one(db)
    .await
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            AppError::Conflict(
                "An entry for this date already exists. Use the Update function to modify.".into(),
            )
        } else {
            e.into()
        }
    })?;

    tracing::info!(user_id, entry_id = row.id, %date, "Entry created");
    row.try_into()
}

/// All of a user's entries, most recent date first.
pub async fn read_all_entries(db: &SqlitePool, user_id: i64) -> AppResult<Vec<MoodEntry>> {
    let rows = sqlx::query_as::<_, EntryRow>(
        r#"
        SELECT * FROM entries
        WHERE user_id = $1
        ORDER BY entry_date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    rows.into_iter().map(MoodEntry::try_from).collect()
}

pub async fn update_entry(
    db: &SqlitePool,
    user_id: i64,
    entry_id: i64,
    input: &EntryInput,
) -> AppResult<MoodEntry> {
    input.check()?;

    let row = sqlx::query_as::<_, EntryRow>(
        r#"
        UPDATE entries
        SET mood = $3, sleep_hours = $4, stress_level = $5, anxiety_level = $6
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(user_id)
    .bind(i64::from(input.mood))
    .bind(input.sleep_hours)
    .bind(i64::from(input.stress_level))
    .bind(i64::from(input.anxiety_level))
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No entry with ID {entry_id}.")))?;

    tracing::info!(user_id, entry_id, "Entry updated");
    row.try_into()
}

pub async fn delete_entry(db: &SqlitePool, user_id: i64, entry_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(user_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("No entry with ID {entry_id}.")));
    }

    tracing::info!(user_id, entry_id, "Entry deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::store::users::create_user;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn input(mood: u8) -> EntryInput {
        EntryInput {
            mood,
            sleep_hours: 7.0,
            stress_level: 4,
            anxiety_level: 3,
        }
    }

    async fn setup() -> (SqlitePool, i64) {
        let db = test_pool().await;
        let user = create_user(&db, "alice", "hash").await.unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_read_all_is_date_descending() {
        let (db, uid) = setup().await;
        create_entry(&db, uid, day(2), &input(2)).await.unwrap();
        create_entry(&db, uid, day(9), &input(5)).await.unwrap();
        create_entry(&db, uid, day(5), &input(3)).await.unwrap();

        let entries = read_all_entries(&db, uid).await.unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(9), day(5), day(2)]);
    }

    #[tokio::test]
    async fn test_duplicate_date_is_conflict() {
        let (db, uid) = setup().await;
        create_entry(&db, uid, day(1), &input(3)).await.unwrap();
        let err = create_entry(&db, uid, day(1), &input(4)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_same_date_allowed_for_different_users() {
        let (db, alice) = setup().await;
        let bob = create_user(&db, "bob", "hash").await.unwrap().id;
        create_entry(&db, alice, day(1), &input(3)).await.unwrap();
        create_entry(&db, bob, day(1), &input(4)).await.unwrap();

        assert_eq!(read_all_entries(&db, alice).await.unwrap().len(), 1);
        assert_eq!(read_all_entries(&db, bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_insert() {
        let (db, uid) = setup().await;
        let err = create_entry(&db, uid, day(1), &input(6)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(read_all_entries(&db, uid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_date_and_id() {
        let (db, uid) = setup().await;
        let created = create_entry(&db, uid, day(3), &input(2)).await.unwrap();
        let changed = EntryInput {
            mood: 5,
            sleep_hours: 9.5,
            stress_level: 1,
            anxiety_level: 1,
        };
        let updated = update_entry(&db, uid, created.id, &changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, day(3));
        assert_eq!(updated.mood, 5);
        assert_eq!(updated.sleep_hours, 9.5);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let (db, uid) = setup().await;
        assert!(matches!(
            update_entry(&db, uid, 999, &input(3)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_entry(&db, uid, 999).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cannot_touch_another_users_entry() {
        let (db, alice) = setup().await;
        let bob = create_user(&db, "bob", "hash").await.unwrap().id;
        let entry = create_entry(&db, alice, day(1), &input(3)).await.unwrap();

        assert!(delete_entry(&db, bob, entry.id).await.is_err());
        assert_eq!(read_all_entries(&db, alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let (db, uid) = setup().await;
        let entry = create_entry(&db, uid, day(1), &input(3)).await.unwrap();
        delete_entry(&db, uid, entry.id).await.unwrap();
        assert!(read_all_entries(&db, uid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_surfaces_as_store_corruption() {
        let (db, uid) = setup().await;
        sqlx::query(
            "INSERT INTO entries (user_id, entry_date, mood, sleep_hours, stress_level, anxiety_level)
             VALUES ($1, 'yesterday', 3, 7.0, 2, 2)",
        )
        .bind(uid)
        .execute(&db)
        .await
        .unwrap();

        let err = read_all_entries(&db, uid).await.unwrap_err();
        assert!(matches!(err, AppError::StoreCorruption(_)));
    }
}
