//! Pure computations over a user's entry history. Inputs are always
//! entries as the store returns them: most recent date first.

pub mod dataset;
pub mod prediction;
pub mod regression;
pub mod split;
pub mod summary;
pub mod trend;

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, NaiveDate};

    use crate::models::entry::MoodEntry;

    /// Entries for consecutive days ending 2026-03-31, returned newest first
    /// like the store does. `rows` are given oldest first as
    /// (mood, sleep, stress, anxiety).
    pub fn history(rows: &[(u8, f64, u8, u8)]) -> Vec<MoodEntry> {
        let last = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let n = rows.len() as i64;
        let mut entries: Vec<MoodEntry> = rows
            .iter()
            .enumerate()
            .map(|(i, &(mood, sleep_hours, stress_level, anxiety_level))| MoodEntry {
                id: i as i64 + 1,
                user_id: 1,
                date: last - Duration::days(n - 1 - i as i64),
                mood,
                sleep_hours,
                stress_level,
                anxiety_level,
            })
            .collect();
        entries.reverse();
        entries
    }

    /// `n` days of plausible, non-degenerate journal data.
    pub fn varied_history(n: usize) -> Vec<MoodEntry> {
        let rows: Vec<(u8, f64, u8, u8)> = (0..n)
            .map(|i| {
                let mood = (i % 5) as u8 + 1;
                let sleep = 5.0 + ((i * 7) % 9) as f64 * 0.5;
                let stress = ((i * 3) % 10) as u8 + 1;
                let anxiety = ((i * 7 + 2) % 10) as u8 + 1;
                (mood, sleep, stress, anxiety)
            })
            .collect();
        history(&rows)
    }
}
