use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::entry::{MoodEntry, DATE_FORMAT};

use super::dataset::PredictionDataset;
use super::regression::LinearModel;
use super::round2;
use super::split::{train_test_split, SPLIT_SEED, TEST_FRACTION};

pub const MOOD_MIN: f64 = 1.0;
pub const MOOD_MAX: f64 = 5.0;

/// Next-day forecast for the most recent entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub latest_date: NaiveDate,
    pub sleep_hours: f64,
    pub stress_level: u8,
    pub anxiety_level: u8,
    /// Clamped to the mood scale, two decimals.
    pub predicted_mood: f64,
    /// Held-out R², two decimals.
    pub r_squared: f64,
    pub train_samples: usize,
    pub test_samples: usize,
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Based on your latest entry ({}):",
            self.latest_date.format(DATE_FORMAT)
        )?;
        writeln!(
            f,
            "  - Sleep: {:.1}h, Stress: {}, Anxiety: {}",
            self.sleep_hours, self.stress_level, self.anxiety_level
        )?;
        writeln!(
            f,
            "🔮 Predicted Mood for Tomorrow (1-5 Scale): **{:.2}**",
            self.predicted_mood
        )?;
        write!(f, "(Model R² Score on Test Data: {:.2})", self.r_squared)
    }
}

/// Forces a raw regression output onto the mood scale. NaN maps to the
/// bottom of the scale.
pub fn clamp_mood(raw: f64) -> f64 {
    if raw.is_nan() {
        return MOOD_MIN;
    }
    raw.clamp(MOOD_MIN, MOOD_MAX)
}

/// Fits a fresh model on the history (newest first) and forecasts the mood
/// following the latest entry.
pub fn predict_next_mood(entries: &[MoodEntry]) -> AppResult<PredictionReport> {
    let dataset = PredictionDataset::from_history(entries)?;
    let split = train_test_split(&dataset, TEST_FRACTION, SPLIT_SEED);

    let model = LinearModel::fit(&split.train.features, &split.train.targets)?;
    let r_squared = model.score(&split.test.features, &split.test.targets);

    let latest = entries
        .iter()
        .max_by_key(|e| e.date)
        .ok_or(AppError::InsufficientData {
            have: 0,
            need: super::dataset::MIN_PREDICTION_ENTRIES,
        })?;
    let raw = model.predict(&latest.features());

    tracing::debug!(
        intercept = model.intercept,
        coefficients = ?model.coefficients,
        raw_prediction = raw,
        r_squared,
        "Mood model fitted"
    );

    Ok(PredictionReport {
        latest_date: latest.date,
        sleep_hours: latest.sleep_hours,
        stress_level: latest.stress_level,
        anxiety_level: latest.anxiety_level,
        predicted_mood: round2(clamp_mood(raw)),
        r_squared: round2(r_squared),
        train_samples: split.train.len(),
        test_samples: split.test.len(),
    })
}
