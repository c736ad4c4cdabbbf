//! Journal operations for the logged-in user. Each call reads a fresh
//! snapshot of the user's entries; nothing is cached between calls.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::analytics::prediction::{self, PredictionReport};
use crate::analytics::summary;
use crate::analytics::trend::{self, TrendSeries};
use crate::error::AppResult;
use crate::models::entry::{EntryInput, MoodEntry};
use crate::models::user::Session;
use crate::store::entries;

pub async fn log_entry(
    db: &SqlitePool,
    session: &Session,
    date: NaiveDate,
    input: &EntryInput,
) -> AppResult<MoodEntry> {
    entries::create_entry(db, session.user_id, date, input).await
}

pub async fn list_entries(db: &SqlitePool, session: &Session) -> AppResult<Vec<MoodEntry>> {
    entries::read_all_entries(db, session.user_id).await
}

pub async fn update_entry(
    db: &SqlitePool,
    session: &Session,
    entry_id: i64,
    input: &EntryInput,
) -> AppResult<MoodEntry> {
    entries::update_entry(db, session.user_id, entry_id, input).await
}

pub async fn delete_entry(db: &SqlitePool, session: &Session, entry_id: i64) -> AppResult<()> {
    entries::delete_entry(db, session.user_id, entry_id).await
}

pub async fn weekly_mood_average(db: &SqlitePool, session: &Session) -> AppResult<f64> {
    let history = entries::read_all_entries(db, session.user_id).await?;
    Ok(summary::weekly_mood_average(&history))
}

pub async fn predict_next_mood(db: &SqlitePool, session: &Session) -> AppResult<PredictionReport> {
    let history = entries::read_all_entries(db, session.user_id).await?;
    let report = prediction::predict_next_mood(&history)?;
    tracing::info!(
        user_id = session.user_id,
        entries = history.len(),
        predicted_mood = report.predicted_mood,
        r_squared = report.r_squared,
        "Mood prediction generated"
    );
    Ok(report)
}

pub async fn prepare_trend_series(db: &SqlitePool, session: &Session) -> AppResult<TrendSeries> {
    let history = entries::read_all_entries(db, session.user_id).await?;
    trend::prepare_trend_series(&history)
}
