//! In-memory document — the rendered content of every dashboard target.
//!
//! [`Document`] is the [`DashboardView`] the poller and the action
//! controllers render into. Each slot is overwritten only by its own render
//! function; page requests read a consistent [`DocumentSnapshot`] of all of
//! them at once.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use vlab_dashboard_app::ports::DashboardView;
use vlab_dashboard_domain::action::{ActionKind, ActionMachine, ButtonView};
use vlab_dashboard_domain::board::{BoardSnapshot, BoardclassSummary, FleetTotals};
use vlab_dashboard_domain::stats::{DenialLog, StatsSummary, UserStats};
use vlab_dashboard_domain::time::LocalTime;

use crate::widgets::action_button::render_action_button;
use crate::widgets::board_table::render_board_rows;
use crate::widgets::boardclass_summary::{LOADING_SUMMARY, render_boardclass_summary};
use crate::widgets::cards::{
    render_denials_today, render_empty_denials_today, render_empty_summary_cards,
    render_summary_cards,
};
use crate::widgets::denials::render_denials;
use crate::widgets::status::{render_connectivity, render_last_updated};
use crate::widgets::loading_row;
use crate::widgets::user_table::render_user_rows;

/// Markup of every render target at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub summary_cards: String,
    pub denials_today: String,
    pub connectivity: String,
    pub last_updated: String,
    pub hwtest_button: String,
    pub config_reload_button: String,
    pub board_table_body: String,
    pub boardclass_summary: String,
    pub user_table_body: String,
    pub denials_section: String,
    pub chart: String,
}

impl Default for DocumentSnapshot {
    fn default() -> Self {
        let idle = |kind| render_action_button(kind, &ActionMachine::new(kind).button());
        Self {
            summary_cards: render_empty_summary_cards(),
            denials_today: render_empty_denials_today(),
            connectivity: render_connectivity(true),
            last_updated: String::new(),
            hwtest_button: idle(ActionKind::HardwareTest),
            config_reload_button: idle(ActionKind::ConfigReload),
            board_table_body: loading_row(7),
            boardclass_summary: LOADING_SUMMARY.to_string(),
            user_table_body: loading_row(4),
            denials_section: render_denials(&DenialLog::default()),
            chart: String::new(),
        }
    }
}

/// Shared, mutable document. Cheap to lock; never held across an await.
#[derive(Debug, Default)]
pub struct Document {
    slots: Mutex<DocumentSnapshot>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.lock().clone()
    }

    /// Overwrite the chart slot. Only the chart handle calls this.
    pub fn set_chart(&self, markup: String) {
        self.lock().chart = markup;
    }

    fn lock(&self) -> MutexGuard<'_, DocumentSnapshot> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DashboardView for Document {
    fn show_totals(&self, totals: &FleetTotals) {
        let html = render_summary_cards(totals);
        self.lock().summary_cards = html;
    }

    fn show_boards(&self, boards: &[BoardSnapshot]) {
        let html = render_board_rows(boards);
        self.lock().board_table_body = html;
    }

    fn show_boardclass_summary(&self, summary: &BoardclassSummary) {
        let html = render_boardclass_summary(summary);
        self.lock().boardclass_summary = html;
    }

    fn show_connectivity(&self, ok: bool) {
        let html = render_connectivity(ok);
        self.lock().connectivity = html;
    }

    fn show_last_updated(&self, at: LocalTime) {
        let html = render_last_updated(&at);
        self.lock().last_updated = html;
    }

    fn show_action(&self, kind: ActionKind, button: &ButtonView) {
        let html = render_action_button(kind, button);
        let mut slots = self.lock();
        match kind {
            ActionKind::HardwareTest => slots.hwtest_button = html,
            ActionKind::ConfigReload => slots.config_reload_button = html,
        }
    }

    fn show_stats_summary(&self, summary: &StatsSummary) {
        let html = render_denials_today(summary);
        self.lock().denials_today = html;
    }

    fn show_users(&self, users: &UserStats) {
        let html = render_user_rows(users);
        self.lock().user_table_body = html;
    }

    fn show_denials(&self, denials: &DenialLog) {
        let html = render_denials(denials);
        self.lock().denials_section = html;
    }
}
