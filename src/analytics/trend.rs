use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::entry::MoodEntry;

pub const TREND_WINDOW: usize = 30;
pub const MIN_TREND_ENTRIES: usize = 2;

/// Parallel, oldest-first series for the mood/sleep chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub dates: Vec<NaiveDate>,
    pub moods: Vec<u8>,
    pub sleep_hours: Vec<f64>,
}

/// Up to the thirty most recent entries of a newest-first history, in
/// chronological order.
pub fn prepare_trend_series(entries: &[MoodEntry]) -> AppResult<TrendSeries> {
    if entries.len() < MIN_TREND_ENTRIES {
        return Err(AppError::NotEnoughData {
            have: entries.len(),
            need: MIN_TREND_ENTRIES,
        });
    }

    let recent = &entries[..entries.len().min(TREND_WINDOW)];
    let mut series = TrendSeries {
        dates: Vec::with_capacity(recent.len()),
        moods: Vec::with_capacity(recent.len()),
        sleep_hours: Vec::with_capacity(recent.len()),
    };
    for entry in recent.iter().rev() {
        series.dates.push(entry.date);
        series.moods.push(entry.mood);
        series.sleep_hours.push(entry.sleep_hours);
    }
    Ok(series)
}
