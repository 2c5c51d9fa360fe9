//! Time and timestamp helpers.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Local wall-clock time, used for the "last updated" heartbeat and for
/// displaying backend timestamps.
pub type LocalTime = DateTime<Local>;

/// Return the current local time.
#[must_use]
pub fn now() -> LocalTime {
    Local::now()
}

/// A point in time as the backend reports it.
///
/// Hardware-test times arrive as unix seconds (sometimes as a numeric string),
/// denial timestamps as naive ISO-8601 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    Unix(f64),
    Text(String),
}

impl RawTime {
    /// Interpret the value as a local time.
    ///
    /// Returns `None` for empty text, non-positive unix values and text that
    /// is neither numeric nor ISO-8601.
    #[must_use]
    pub fn to_local(&self) -> Option<LocalTime> {
        match self {
            Self::Unix(secs) => from_unix(*secs),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                if let Ok(secs) = text.parse::<f64>() {
                    return from_unix(secs);
                }
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(parsed.with_timezone(&Local));
                }
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                    .and_then(|naive| naive.and_local_timezone(Local).earliest())
            }
        }
    }

    /// Whether the backend sent nothing meaningful (`0` or an empty string).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Unix(secs) => *secs == 0.0,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_unix(secs: f64) -> Option<LocalTime> {
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0).map(|utc| utc.with_timezone(&Local))
}
