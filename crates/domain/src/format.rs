//! Display formatting for durations, timestamps and chart bucket labels.

use chrono::NaiveDateTime;

use crate::time::{LocalTime, RawTime};

/// Rendered in place of a value that is missing or meaningless.
pub const PLACEHOLDER: &str = "-";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a held duration given in seconds.
///
/// - at least one hour: `"{h}h {m}m"`
/// - at least one minute: `"{m}m {s}s"`
/// - otherwise: `"{s}s"`
///
/// Missing, zero, negative and non-finite inputs render as [`PLACEHOLDER`].
/// Fractional seconds are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s > 0.0) else {
        return PLACEHOLDER.to_string();
    };
    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Format a backend timestamp as local date and time.
///
/// Missing or blank values render as [`PLACEHOLDER`]; text that cannot be
/// interpreted is returned unchanged.
#[must_use]
pub fn format_time(value: Option<&RawTime>) -> String {
    let Some(value) = value.filter(|v| !v.is_blank()) else {
        return PLACEHOLDER.to_string();
    };
    match (value.to_local(), value) {
        (Some(local), _) => local.format(TIME_FORMAT).to_string(),
        (None, RawTime::Text(text)) => text.clone(),
        (None, RawTime::Unix(_)) => PLACEHOLDER.to_string(),
    }
}

/// Format the wall-clock part of a local time (`HH:MM:SS`).
#[must_use]
pub fn format_clock(time: &LocalTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Shorten an hourly bucket label (`2026-02-16 14:00`) to `Feb 16 14:00`.
///
/// Labels in any other shape are returned unchanged.
#[must_use]
pub fn format_hour_label(label: &str) -> String {
    NaiveDateTime::parse_from_str(label, "%Y-%m-%d %H:%M")
        .map(|bucket| bucket.format("%b %-d %H:%M").to_string())
        .unwrap_or_else(|_| label.to_string())
}
