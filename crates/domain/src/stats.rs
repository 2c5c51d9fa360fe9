//! Usage statistics derived by the backend from the relay access log.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::time::RawTime;

/// Session starts within one hour bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyStat {
    /// Bucket label, `YYYY-MM-DD HH:00`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hour: String,
    /// Number of boards locked during the hour.
    #[serde(default, deserialize_with = "null_as_default")]
    pub locks: u64,
}

/// Body of `GET /api/stats/hourly`, oldest bucket first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hourly: Vec<HourlyStat>,
}

/// Body of `GET /api/stats/summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub denials_today: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sessions: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_denials: u64,
}

/// Aggregated session usage of one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    /// Completed sessions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    /// Seconds held across all sessions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_time_s: f64,
    /// Mean seconds held per session.
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_time_s: f64,
}

/// Body of `GET /api/stats/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<UserStat>,
}

/// A rejected allocation attempt: nobody could get a board of the class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenialEvent {
    #[serde(default)]
    pub timestamp: Option<RawTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub boardclass: String,
}

/// Body of `GET /api/stats/denials`, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenialLog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub denials: Vec<DenialEvent>,
}

impl DenialLog {
    /// Denials in display order, newest first.
    pub fn most_recent_first(&self) -> impl Iterator<Item = &DenialEvent> {
        self.denials.iter().rev()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.denials.is_empty()
    }
}
