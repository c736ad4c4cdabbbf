use std::fmt::Write;

use crate::analytics::trend::TrendSeries;
use crate::models::entry::DATE_FORMAT;

const TITLE: &str = "30-Day Trend: Mood & Sleep Correlation";
const SLEEP_AXIS_MAX: f64 = 12.0;
const SLEEP_BAR_WIDTH: usize = 24;

/// Text rendering of the trend series: one row per day with the mood on a
/// five-dot scale and sleep as a bar over 0-12 hours.
pub fn render_trend(series: &TrendSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{TITLE}");
    let _ = writeln!(
        out,
        "{:<10} | {:<7} | Sleep (0-{}h)",
        "Date", "Mood", SLEEP_AXIS_MAX
    );
    let _ = writeln!(out, "{}", "-".repeat(10 + 3 + 7 + 3 + SLEEP_BAR_WIDTH + 7));

    for ((date, mood), sleep) in series
        .dates
        .iter()
        .zip(&series.moods)
        .zip(&series.sleep_hours)
    {
        let _ = writeln!(
            out,
            "{:<10} | {} {} | {:<width$} {:.1}h",
            date.format(DATE_FORMAT).to_string(),
            mood_dots(*mood),
            mood,
            sleep_bar(*sleep),
            sleep,
            width = SLEEP_BAR_WIDTH
        );
    }
    out
}

fn mood_dots(mood: u8) -> String {
    let filled = usize::from(mood.min(5));
    format!("{}{}", "●".repeat(filled), "○".repeat(5 - filled))
}

fn sleep_bar(hours: f64) -> String {
    let ratio = (hours / SLEEP_AXIS_MAX).clamp(0.0, 1.0);
    let cells = (ratio * SLEEP_BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells)
}
