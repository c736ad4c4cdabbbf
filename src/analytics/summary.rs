use crate::models::entry::MoodEntry;

use super::round2;

pub const WEEKLY_WINDOW: usize = 7;

/// Mean mood over the most recent seven entries, rounded to two decimals.
/// An empty history averages to `0.0`.
pub fn weekly_mood_average(entries: &[MoodEntry]) -> f64 {
    let recent = &entries[..entries.len().min(WEEKLY_WINDOW)];
    if recent.is_empty() {
        return 0.0;
    }

    let total: u32 = recent.iter().map(|e| u32::from(e.mood)).sum();
    round2(f64::from(total) / recent.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::history;

    fn moods_newest_first(moods: &[u8]) -> Vec<MoodEntry> {
        let oldest_first: Vec<(u8, f64, u8, u8)> =
            moods.iter().rev().map(|&m| (m, 7.0, 3, 3)).collect();
        history(&oldest_first)
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(weekly_mood_average(&[]), 0.0);
    }

    #[test]
    fn test_only_most_recent_seven_count() {
        let entries = moods_newest_first(&[5, 4, 3, 2, 1, 5, 4, 3]);
        assert_eq!(entries[0].mood, 5);
        assert_eq!(weekly_mood_average(&entries), 3.43);
    }

    #[test]
    fn test_fewer_than_seven() {
        let entries = moods_newest_first(&[4, 5]);
        assert_eq!(weekly_mood_average(&entries), 4.5);
    }

    #[test]
    fn test_single_entry() {
        let entries = moods_newest_first(&[2]);
        assert_eq!(weekly_mood_average(&entries), 2.0);
    }
}
