//! View port — the render targets of the dashboard.
//!
//! Each method owns exactly one target and replaces its whole content.
//! Implementations must be idempotent: showing the same data twice leaves the
//! target byte-identical.

use vlab_dashboard_domain::action::{ActionKind, ButtonView};
use vlab_dashboard_domain::board::{BoardSnapshot, BoardclassSummary, FleetTotals};
use vlab_dashboard_domain::stats::{DenialLog, StatsSummary, UserStats};
use vlab_dashboard_domain::time::LocalTime;

/// Render sink for everything the polling cycles and controllers produce.
pub trait DashboardView: Send + Sync {
    /// Summary cards with the fleet-wide counts.
    fn show_totals(&self, totals: &FleetTotals);

    /// The board table body.
    fn show_boards(&self, boards: &[BoardSnapshot]);

    /// Per-class utilization panels.
    fn show_boardclass_summary(&self, summary: &BoardclassSummary);

    /// Banner telling whether the backend can reach its datastore.
    fn show_connectivity(&self, ok: bool);

    /// The "last updated" heartbeat.
    fn show_last_updated(&self, at: LocalTime);

    /// The button of one action.
    fn show_action(&self, kind: ActionKind, button: &ButtonView);

    /// The denials-today card.
    fn show_stats_summary(&self, summary: &StatsSummary);

    /// The per-user usage table body.
    fn show_users(&self, users: &UserStats);

    /// The denial log section.
    fn show_denials(&self, denials: &DenialLog);
}
