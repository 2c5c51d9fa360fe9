//! Board inventory — per-board snapshots, fleet totals and per-class summaries.
//!
//! Everything here is rebuilt wholesale from each `/api/boards` poll; nothing
//! tracks a board's identity across polls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ActionStatus};
use crate::de::{null_as_default, string_or_number};
use crate::time::RawTime;

/// Allocation status of a single board.
///
/// Any status string the dashboard does not recognise deserializes to
/// [`Unknown`](Self::Unknown) instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    Available,
    InUseLocked,
    InUseUnlocked,
    HwtestFailed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BoardStatus {
    /// Whether a held duration means anything for a board in this status.
    ///
    /// Free boards and boards pulled from the pool by a failed hardware test
    /// are not held by anyone, whatever the payload says.
    #[must_use]
    pub fn shows_duration(self) -> bool {
        !matches!(self, Self::Available | Self::HwtestFailed)
    }
}

impl std::fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::InUseLocked => f.write_str("in_use_locked"),
            Self::InUseUnlocked => f.write_str("in_use_unlocked"),
            Self::HwtestFailed => f.write_str("hwtest_failed"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Outcome of the most recent hardware self-test of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwtestOutcome {
    Untested,
    Pass,
    Fail,
}

/// One physical board as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub boardclass: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serial: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub port: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BoardStatus,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub duration_s: Option<f64>,
    #[serde(default)]
    pub hwtest_status: Option<String>,
    #[serde(default)]
    pub hwtest_time: Option<RawTime>,
    #[serde(default)]
    pub hwtest_message: Option<String>,
}

impl BoardSnapshot {
    /// The user holding the board, if any (empty strings count as none).
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref().filter(|user| !user.is_empty())
    }

    /// The held duration to display, suppressed for statuses where it is
    /// meaningless even if the payload carries a stale value.
    #[must_use]
    pub fn held_duration(&self) -> Option<f64> {
        if self.status.shows_duration() {
            self.duration_s
        } else {
            None
        }
    }

    /// Interpret `hwtest_status`; anything other than `pass` counts as a failure.
    #[must_use]
    pub fn hwtest_outcome(&self) -> HwtestOutcome {
        match self.hwtest_status.as_deref().map(str::trim) {
            None | Some("") => HwtestOutcome::Untested,
            Some(status) if status.eq_ignore_ascii_case("pass") => HwtestOutcome::Pass,
            Some(_) => HwtestOutcome::Fail,
        }
    }

    /// The failure message, if the backend sent a non-empty one.
    #[must_use]
    pub fn hwtest_message(&self) -> Option<&str> {
        self.hwtest_message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

/// Aggregate counts across the whole fleet, computed server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetTotals {
    pub total: u64,
    pub available: u64,
    pub in_use: u64,
    pub in_use_locked: u64,
    pub in_use_unlocked: u64,
    pub hwtest_failed: u64,
}

/// Usage counts for one board class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardclassCounts {
    pub total: u64,
    pub in_use: u64,
    pub available: u64,
    pub in_use_locked: u64,
    pub in_use_unlocked: u64,
    pub hwtest_failed: u64,
}

/// How busy a board class is, bucketed for colouring the utilization bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationLevel {
    /// At most 50 %.
    Low,
    /// Above 50 %, at most 80 %.
    Elevated,
    /// Above 80 %.
    High,
}

impl BoardclassCounts {
    /// `round(100 * in_use / total)`, or `0` for an empty class.
    #[must_use]
    pub fn utilization_percent(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let (in_use, total) = (u128::from(self.in_use), u128::from(self.total));
        u64::try_from((200 * in_use + total) / (2 * total)).unwrap_or(u64::MAX)
    }

    /// Bucket [`utilization_percent`](Self::utilization_percent).
    #[must_use]
    pub fn utilization_level(&self) -> UtilizationLevel {
        match self.utilization_percent() {
            pct if pct > 80 => UtilizationLevel::High,
            pct if pct > 50 => UtilizationLevel::Elevated,
            _ => UtilizationLevel::Low,
        }
    }
}

/// Per-class counts keyed by class name.
///
/// A `BTreeMap` so iteration is always sorted by class name, independent of
/// the order the backend emitted the keys in.
pub type BoardclassSummary = BTreeMap<String, BoardclassCounts>;

/// Body of `GET /api/boards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardsPayload {
    #[serde(default)]
    pub totals: Option<FleetTotals>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<BoardSnapshot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: BoardclassSummary,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redis_ok: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hwtest_running: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hwtest_trigger: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config_reload_pending: bool,
}

impl BoardsPayload {
    /// Server-side progress of the given action, folded from the raw flags.
    #[must_use]
    pub fn action_status(&self, kind: ActionKind) -> ActionStatus {
        match kind {
            ActionKind::HardwareTest => {
                ActionStatus::from_flags(self.hwtest_running, self.hwtest_trigger)
            }
            ActionKind::ConfigReload => ActionStatus::from_flags(false, self.config_reload_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(status: BoardStatus, duration_s: Option<f64>) -> BoardSnapshot {
        BoardSnapshot {
            boardclass: "vlab_zybo-z7".to_string(),
            serial: "210351A77F75".to_string(),
            status,
            duration_s,
            ..BoardSnapshot::default()
        }
    }

    #[test]
    fn should_deserialize_known_statuses() {
        let status: BoardStatus = serde_json::from_str("\"in_use_unlocked\"").unwrap();
        assert_eq!(status, BoardStatus::InUseUnlocked);
        let status: BoardStatus = serde_json::from_str("\"hwtest_failed\"").unwrap();
        assert_eq!(status, BoardStatus::HwtestFailed);
    }

    #[test]
    fn should_fall_back_to_unknown_for_unrecognised_status() {
        let status: BoardStatus = serde_json::from_str("\"on_fire\"").unwrap();
        assert_eq!(status, BoardStatus::Unknown);
    }

    #[test]
    fn should_display_snake_case_status() {
        assert_eq!(BoardStatus::InUseLocked.to_string(), "in_use_locked");
        assert_eq!(BoardStatus::Unknown.to_string(), "unknown");
    }

    #[test]
    fn should_suppress_duration_for_available_and_failed_boards() {
        assert_eq!(board(BoardStatus::Available, Some(500.0)).held_duration(), None);
        assert_eq!(board(BoardStatus::HwtestFailed, Some(500.0)).held_duration(), None);
        assert_eq!(
            board(BoardStatus::InUseLocked, Some(500.0)).held_duration(),
            Some(500.0)
        );
        assert_eq!(
            board(BoardStatus::Unknown, Some(7.0)).held_duration(),
            Some(7.0)
        );
    }

    #[test]
    fn should_treat_empty_user_as_absent() {
        let mut snapshot = board(BoardStatus::InUseLocked, None);
        snapshot.user = Some(String::new());
        assert_eq!(snapshot.user(), None);
        snapshot.user = Some("ian".to_string());
        assert_eq!(snapshot.user(), Some("ian"));
    }

    #[test]
    fn should_interpret_hwtest_outcome() {
        let mut snapshot = board(BoardStatus::Available, None);
        assert_eq!(snapshot.hwtest_outcome(), HwtestOutcome::Untested);
        snapshot.hwtest_status = Some(String::new());
        assert_eq!(snapshot.hwtest_outcome(), HwtestOutcome::Untested);
        snapshot.hwtest_status = Some("pass".to_string());
        assert_eq!(snapshot.hwtest_outcome(), HwtestOutcome::Pass);
        snapshot.hwtest_status = Some("fail".to_string());
        assert_eq!(snapshot.hwtest_outcome(), HwtestOutcome::Fail);
        snapshot.hwtest_status = Some("timeout".to_string());
        assert_eq!(snapshot.hwtest_outcome(), HwtestOutcome::Fail);
    }

    #[test]
    fn should_compute_rounded_utilization() {
        let counts = BoardclassCounts {
            total: 3,
            in_use: 2,
            ..BoardclassCounts::default()
        };
        assert_eq!(counts.utilization_percent(), 67);
        let counts = BoardclassCounts {
            total: 8,
            in_use: 1,
            ..BoardclassCounts::default()
        };
        // 12.5 rounds half up like the browser did
        assert_eq!(counts.utilization_percent(), 13);
    }

    #[test]
    fn should_compute_utilization_for_huge_counts() {
        let counts = BoardclassCounts {
            total: u64::MAX,
            in_use: u64::MAX / 2,
            ..BoardclassCounts::default()
        };
        assert_eq!(counts.utilization_percent(), 50);

        let full = BoardclassCounts {
            total: u64::MAX,
            in_use: u64::MAX,
            ..BoardclassCounts::default()
        };
        assert_eq!(full.utilization_percent(), 100);
        assert_eq!(full.utilization_level(), UtilizationLevel::High);
    }

    #[test]
    fn should_report_zero_utilization_for_empty_class() {
        let counts = BoardclassCounts::default();
        assert_eq!(counts.utilization_percent(), 0);
        assert_eq!(counts.utilization_level(), UtilizationLevel::Low);
    }

    #[test]
    fn should_bucket_utilization_by_thresholds() {
        let level = |in_use| {
            BoardclassCounts {
                total: 100,
                in_use,
                ..BoardclassCounts::default()
            }
            .utilization_level()
        };
        assert_eq!(level(50), UtilizationLevel::Low);
        assert_eq!(level(51), UtilizationLevel::Elevated);
        assert_eq!(level(80), UtilizationLevel::Elevated);
        assert_eq!(level(81), UtilizationLevel::High);
    }

    #[test]
    fn should_deserialize_full_boards_payload() {
        let json = r#"{
            "totals": {"total": 5, "available": 2, "in_use_locked": 2, "in_use_unlocked": 1, "hwtest_failed": 0},
            "boards": [
                {"serial": "A1", "boardclass": "zybo", "server": "relay", "port": 9001,
                 "status": "in_use_locked", "user": "ian", "duration_s": 125,
                 "hwtest_status": "pass", "hwtest_time": "1771276746"}
            ],
            "summary": {"zybo": {"total": 1, "in_use": 1, "available": 0, "in_use_locked": 1, "in_use_unlocked": 0}},
            "redis_ok": true,
            "hwtest_running": false,
            "hwtest_trigger": true,
            "config_reload_pending": false,
            "timestamp": 1771276746
        }"#;
        let payload: BoardsPayload = serde_json::from_str(json).unwrap();
        let totals = payload.totals.unwrap();
        assert_eq!(totals.total, 5);
        assert_eq!(totals.in_use_unlocked, 1);
        assert_eq!(payload.boards[0].port, "9001");
        assert_eq!(payload.boards[0].duration_s, Some(125.0));
        assert_eq!(payload.summary["zybo"].hwtest_failed, 0);
        assert!(payload.redis_ok);
        assert_eq!(
            payload.action_status(ActionKind::HardwareTest),
            ActionStatus::Requested
        );
        assert_eq!(
            payload.action_status(ActionKind::ConfigReload),
            ActionStatus::Idle
        );
    }

    #[test]
    fn should_tolerate_missing_and_null_collections() {
        let payload: BoardsPayload =
            serde_json::from_str(r#"{"boards": null, "summary": null}"#).unwrap();
        assert!(payload.totals.is_none());
        assert!(payload.boards.is_empty());
        assert!(payload.summary.is_empty());
        assert!(!payload.redis_ok);
    }

    #[test]
    fn should_iterate_summary_sorted_by_class_name() {
        let payload: BoardsPayload = serde_json::from_str(
            r#"{"summary": {"zybo": {"total": 1}, "arty": {"total": 2}, "nexys": {"total": 3}}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = payload.summary.keys().map(String::as_str).collect();
        assert_eq!(keys, ["arty", "nexys", "zybo"]);
    }

    #[test]
    fn should_prefer_running_over_trigger_flag() {
        let payload = BoardsPayload {
            hwtest_running: true,
            hwtest_trigger: true,
            config_reload_pending: true,
            ..BoardsPayload::default()
        };
        assert_eq!(
            payload.action_status(ActionKind::HardwareTest),
            ActionStatus::Running
        );
        assert_eq!(
            payload.action_status(ActionKind::ConfigReload),
            ActionStatus::Requested
        );
    }
}
