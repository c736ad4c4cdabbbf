use std::fmt::Write;

use crate::models::entry::{MoodEntry, DATE_FORMAT};

const RULE_WIDTH: usize = 60;

pub fn render_entries(entries: &[MoodEntry]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Your Historical Entries ---");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<4} | {:<10} | {:<7} | {:<7} | {:<7} | {:<7}",
        "ID", "Date", "Mood", "Sleep", "Stress", "Anxiety"
    );
    let _ = writeln!(out, "{rule}");
    for e in entries {
        let _ = writeln!(
            out,
            "{:<4} | {:<10} | {:<7} | {:<7.1} | {:<7} | {:<7}",
            e.id,
            e.date.format(DATE_FORMAT).to_string(),
            e.mood,
            e.sleep_hours,
            e.stress_level,
            e.anxiety_level
        );
    }
    let _ = write!(out, "{rule}");
    out
}
