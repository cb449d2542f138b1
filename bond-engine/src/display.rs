//! Human-readable bond durations

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Smallest unit shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Whole days only
    Day,
    /// Days, hours and minutes
    Minute,
}

/// Format a duration in seconds, e.g. `"7 days"` or `"1 day, 2 hrs, 5 mins"`
///
/// Fractions of the smallest unit are dropped. Negative durations render as zero.
pub fn prettify_seconds(seconds: Decimal, resolution: Resolution) -> String {
    let total = seconds.floor().to_i64().unwrap_or(i64::MAX).max(0);

    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    if resolution == Resolution::Day {
        return plural(days, "day", "days");
    }

    let parts: Vec<String> = [
        (days, "day", "days"),
        (hours, "hr", "hrs"),
        (minutes, "min", "mins"),
    ]
    .into_iter()
    .filter(|(value, _, _)| *value > 0)
    .map(|(value, one, many)| plural(value, one, many))
    .collect();

    if parts.is_empty() {
        plural(0, "min", "mins")
    } else {
        parts.join(", ")
    }
}

fn plural(value: i64, one: &str, many: &str) -> String {
    format!("{} {}", value, if value == 1 { one } else { many })
}

/// What a bond duration cell shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationView {
    /// Duration not known yet
    Loading,
    /// Formatted duration
    Text(String),
}

impl DurationView {
    /// Text to show, with a placeholder while loading
    pub fn label(&self) -> &str {
        match self {
            DurationView::Loading => "...",
            DurationView::Text(text) => text,
        }
    }
}

/// Bond duration cell
pub struct BondDuration;

impl BondDuration {
    /// Render an optional duration in seconds
    pub fn render(duration: Option<Decimal>) -> DurationView {
        match duration {
            Some(seconds) => DurationView::Text(prettify_seconds(seconds, Resolution::Day)),
            None => DurationView::Loading,
        }
    }
}
