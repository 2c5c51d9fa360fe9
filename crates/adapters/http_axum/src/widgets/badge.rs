//! Badge and row-tint lookups.

use vlab_dashboard_domain::board::{BoardSnapshot, BoardStatus, HwtestOutcome};
use vlab_dashboard_domain::format::format_time;

const DEFAULT_HWTEST_FAILURE: &str = "Hardware test failed";

/// Colour class, label and optional tooltip of one badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge<'a> {
    pub class: &'static str,
    pub label: &'static str,
    pub title: Option<&'a str>,
}

impl Badge<'_> {
    const fn plain(class: &'static str, label: &'static str) -> Self {
        Self {
            class,
            label,
            title: None,
        }
    }
}

/// Badge for a board status; anything unrecognised is a gray "Unknown".
#[must_use]
pub fn status_badge(status: BoardStatus) -> Badge<'static> {
    match status {
        BoardStatus::Available => Badge::plain("badge-green", "Available"),
        BoardStatus::InUseLocked => Badge::plain("badge-red", "In Use (Locked)"),
        BoardStatus::InUseUnlocked => Badge::plain("badge-amber", "In Use (Unlocked)"),
        BoardStatus::HwtestFailed => Badge::plain("badge-purple", "HW Test Failed"),
        BoardStatus::Unknown => Badge::plain("badge-gray", "Unknown"),
    }
}

/// Row background for a board status; unknown statuses get none.
#[must_use]
pub fn row_tint(status: BoardStatus) -> &'static str {
    match status {
        BoardStatus::Available => "row-green",
        BoardStatus::InUseLocked => "row-red",
        BoardStatus::InUseUnlocked => "row-amber",
        BoardStatus::HwtestFailed => "row-purple",
        BoardStatus::Unknown => "",
    }
}

/// Outcome of the last hardware test. A failure carries its message as the
/// tooltip.
#[must_use]
pub fn hwtest_badge(board: &BoardSnapshot) -> Badge<'_> {
    match board.hwtest_outcome() {
        HwtestOutcome::Untested => Badge::plain("badge-gray", "Untested"),
        HwtestOutcome::Pass => Badge::plain("badge-green", "Pass"),
        HwtestOutcome::Fail => Badge {
            class: "badge-red",
            label: "Fail",
            title: Some(board.hwtest_message().unwrap_or(DEFAULT_HWTEST_FAILURE)),
        },
    }
}

/// Formatted time of the last hardware test, empty when there is none to
/// show.
#[must_use]
pub fn hwtest_time(board: &BoardSnapshot) -> String {
    if board.hwtest_outcome() == HwtestOutcome::Untested {
        return String::new();
    }
    board
        .hwtest_time
        .as_ref()
        .filter(|time| !time.is_blank())
        .map(|time| format_time(Some(time)))
        .unwrap_or_default()
}
