use std::fmt;

use chrono::NaiveDate;
use sqlx::FromRow;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One user's record for one calendar day.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MoodEntry {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 5))]
    pub mood: u8,
    #[validate(range(min = 0.0))]
    pub sleep_hours: f64,
    #[validate(range(min = 1, max = 10))]
    pub stress_level: u8,
    #[validate(range(min = 1, max = 10))]
    pub anxiety_level: u8,
}

impl MoodEntry {
    /// (sleep_hours, stress_level, anxiety_level) as regression inputs.
    pub fn features(&self) -> [f64; 3] {
        [
            self.sleep_hours,
            f64::from(self.stress_level),
            f64::from(self.anxiety_level),
        ]
    }
}

impl fmt::Display for MoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Date: {} | Mood: {}/5 | Sleep: {}h | Stress: {}/10 | Anxiety: {}/10",
            self.id,
            self.date.format(DATE_FORMAT),
            self.mood,
            self.sleep_hours,
            self.stress_level,
            self.anxiety_level
        )
    }
}

/// Raw `entries` row as SQLite hands it back.
#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: i64,
    pub user_id: i64,
    pub entry_date: String,
    pub mood: i64,
    pub sleep_hours: f64,
    pub stress_level: i64,
    pub anxiety_level: i64,
}

impl TryFrom<EntryRow> for MoodEntry {
    type Error = AppError;

    fn try_from(row: EntryRow) -> AppResult<Self> {
        let corrupt = |what: &str| {
            AppError::StoreCorruption(format!("entry {}: {}", row.id, what))
        };

        let date = NaiveDate::parse_from_str(&row.entry_date, DATE_FORMAT)
            .map_err(|_| corrupt(&format!("bad date {:?}", row.entry_date)))?;
        let mood = u8::try_from(row.mood).map_err(|_| corrupt("mood out of range"))?;
        let stress_level =
            u8::try_from(row.stress_level).map_err(|_| corrupt("stress out of range"))?;
        let anxiety_level =
            u8::try_from(row.anxiety_level).map_err(|_| corrupt("anxiety out of range"))?;

        if !row.sleep_hours.is_finite() {
            return Err(corrupt("sleep hours not finite"));
        }

        let entry = MoodEntry {
            id: row.id,
            user_id: row.user_id,
            date,
            mood,
            sleep_hours: row.sleep_hours,
            stress_level,
            anxiety_level,
        };
        entry
            .validate()
            .map_err(|e| corrupt(&format!("invalid values ({e})")))?;
        Ok(entry)
    }
}

/// Validated payload for creating or updating an entry.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct EntryInput {
    #[validate(range(min = 1, max = 5, message = "Mood must be between 1 and 5"))]
    pub mood: u8,
    #[validate(range(min = 0.0, message = "Sleep hours must not be negative"))]
    pub sleep_hours: f64,
    #[validate(range(min = 1, max = 10, message = "Stress level must be between 1 and 10"))]
    pub stress_level: u8,
    #[validate(range(min = 1, max = 10, message = "Anxiety level must be between 1 and 10"))]
    pub anxiety_level: u8,
}

impl EntryInput {
    pub fn check(&self) -> AppResult<()> {
        if !self.sleep_hours.is_finite() {
            return Err(AppError::Validation("Sleep hours must be a number".into()));
        }
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> EntryRow {
        EntryRow {
            id: 7,
            user_id: 1,
            entry_date: "2026-02-10".into(),
            mood: 4,
            sleep_hours: 7.5,
            stress_level: 3,
            anxiety_level: 2,
        }
    }

    #[test]
    fn test_row_parses_into_entry() {
        let entry = MoodEntry::try_from(row()).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert_eq!(entry.mood, 4);
        assert_eq!(entry.features(), [7.5, 3.0, 2.0]);
    }

    #[test]
    fn test_row_with_bad_date_is_corruption() {
        let mut r = row();
        r.entry_date = "10/02/2026".into();
        let err = MoodEntry::try_from(r).unwrap_err();
        assert!(matches!(err, AppError::StoreCorruption(_)));
    }

    #[test]
    fn test_row_with_out_of_range_mood_is_corruption() {
        let mut r = row();
        r.mood = 9;
        assert!(matches!(
            MoodEntry::try_from(r),
            Err(AppError::StoreCorruption(_))
        ));

        let mut r = row();
        r.stress_level = -1;
        assert!(matches!(
            MoodEntry::try_from(r),
            Err(AppError::StoreCorruption(_))
        ));
    }

    #[test]
    fn test_row_with_negative_sleep_is_corruption() {
        let mut r = row();
        r.sleep_hours = -2.0;
        assert!(matches!(
            MoodEntry::try_from(r),
            Err(AppError::StoreCorruption(_))
        ));
    }

    #[test]
    fn test_input_ranges() {
        let ok = EntryInput {
            mood: 5,
            sleep_hours: 0.0,
            stress_level: 10,
            anxiety_level: 1,
        };
        assert!(ok.check().is_ok());

        let bad_mood = EntryInput { mood: 0, ..ok };
        assert!(matches!(bad_mood.check(), Err(AppError::Validation(_))));

        let bad_anxiety = EntryInput {
            anxiety_level: 11,
            ..ok
        };
        assert!(bad_anxiety.check().is_err());

        let nan_sleep = EntryInput {
            sleep_hours: f64::NAN,
            ..ok
        };
        assert!(nan_sleep.check().is_err());
    }

    #[test]
    fn test_display_format() {
        let entry = MoodEntry::try_from(row()).unwrap();
        assert_eq!(
            entry.to_string(),
            "ID: 7 | Date: 2026-02-10 | Mood: 4/5 | Sleep: 7.5h | Stress: 3/10 | Anxiety: 2/10"
        );
    }
}
