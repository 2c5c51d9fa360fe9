//! Backend port — the board-pool service the dashboard polls.
//!
//! Each method is one independent request with its own error channel. A
//! failure of one request says nothing about any other.

use std::future::Future;

use vlab_dashboard_domain::action::{ActionKind, TriggerResponse};
use vlab_dashboard_domain::board::BoardsPayload;
use vlab_dashboard_domain::error::FetchError;
use vlab_dashboard_domain::stats::{DenialLog, HourlyStats, StatsSummary, UserStats};

/// Source of board inventory and usage statistics, and sink for action triggers.
pub trait DashboardBackend: Send + Sync {
    /// `GET /api/boards`: inventory, totals, per-class summary and progress flags.
    fn fetch_boards(&self) -> impl Future<Output = Result<BoardsPayload, FetchError>> + Send;

    /// `GET /api/stats/hourly`: session starts per hour bucket.
    fn fetch_hourly(&self) -> impl Future<Output = Result<HourlyStats, FetchError>> + Send;

    /// `GET /api/stats/summary`: aggregate counters.
    fn fetch_summary(&self) -> impl Future<Output = Result<StatsSummary, FetchError>> + Send;

    /// `GET /api/stats/users`: per-user session table.
    fn fetch_users(&self) -> impl Future<Output = Result<UserStats, FetchError>> + Send;

    /// `GET /api/stats/denials`: rejected allocation attempts, oldest first.
    fn fetch_denials(&self) -> impl Future<Output = Result<DenialLog, FetchError>> + Send;

    /// `POST` the trigger endpoint of `kind`.
    ///
    /// An application-level rejection (`ok: false`) is a successful request;
    /// only transport and decoding failures are errors.
    fn trigger(
        &self,
        kind: ActionKind,
    ) -> impl Future<Output = Result<TriggerResponse, FetchError>> + Send;
}
