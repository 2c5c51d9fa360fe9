//! Poller — the two fixed-cadence fetch-and-dispatch cycles.
//!
//! The board cycle refreshes the inventory, the connectivity banner and the
//! action buttons. The statistics cycle issues four independent requests and
//! renders each one as soon as it lands. Ticks never wait for the previous
//! cycle: every cycle runs in its own task, so a slow backend only delays
//! its own widgets.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use vlab_dashboard_domain::board::BoardsPayload;
use vlab_dashboard_domain::chart::ChartDataset;
use vlab_dashboard_domain::error::FetchError;
use vlab_dashboard_domain::time;

use crate::ports::{ChartHandle, DashboardBackend, DashboardView};
use crate::services::ActionController;

/// Cadence of the two cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub boards_interval: Duration,
    pub stats_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            boards_interval: Duration::from_secs(10),
            stats_interval: Duration::from_secs(60),
        }
    }
}

/// Fetches from the backend and dispatches to the view, the chart and the
/// action controllers.
pub struct Poller<B, V, C> {
    backend: Arc<B>,
    view: Arc<V>,
    chart: Arc<C>,
    actions: Vec<Arc<ActionController<B, V>>>,
}

impl<B, V, C> Poller<B, V, C>
where
    B: DashboardBackend + 'static,
    V: DashboardView + 'static,
    C: ChartHandle + 'static,
{
    pub fn new(
        backend: Arc<B>,
        view: Arc<V>,
        chart: Arc<C>,
        actions: Vec<Arc<ActionController<B, V>>>,
    ) -> Self {
        Self {
            backend,
            view,
            chart,
            actions,
        }
    }

    /// Start both tickers. The first tick of each fires immediately.
    pub fn start(self: Arc<Self>, config: PollerConfig) -> PollerHandle<C> {
        let boards = tokio::spawn({
            let poller = Arc::clone(&self);
            async move {
                let mut ticker = tokio::time::interval(config.boards_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    let poller = Arc::clone(&poller);
                    tokio::spawn(async move {
                        // failures are logged and shown by the banner
                        if let Err(err) = poller.refresh_boards().await {
                            tracing::trace!(%err, "board cycle ended with error");
                        }
                    });
                }
            }
        });
        let stats = tokio::spawn({
            let poller = Arc::clone(&self);
            async move {
                let mut ticker = tokio::time::interval(config.stats_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    poller.refresh_stats();
                }
            }
        });
        tracing::info!(
            boards_interval = ?config.boards_interval,
            stats_interval = ?config.stats_interval,
            "poller started"
        );
        PollerHandle {
            tickers: vec![boards, stats],
            chart: Arc::clone(&self.chart),
        }
    }

    /// Run one board cycle.
    ///
    /// On failure only the connectivity banner changes; every other target
    /// keeps its last rendered content.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after it has been logged and reflected in the
    /// connectivity banner.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_boards(&self) -> Result<(), FetchError> {
        match self.backend.fetch_boards().await {
            Ok(payload) => {
                self.apply_boards(&payload);
                tracing::debug!(boards = payload.boards.len(), "boards refreshed");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, endpoint = err.endpoint(), "board poll failed");
                self.view.show_connectivity(false);
                Err(err)
            }
        }
    }

    fn apply_boards(&self, payload: &BoardsPayload) {
        if let Some(totals) = &payload.totals {
            self.view.show_totals(totals);
        }
        self.view.show_boards(&payload.boards);
        self.view.show_boardclass_summary(&payload.summary);
        self.view.show_connectivity(payload.redis_ok);
        for action in &self.actions {
            action.reconcile(payload.action_status(action.kind()));
        }
        self.view.show_last_updated(time::now());
    }

    /// Run one statistics cycle: four requests in flight at once, each
    /// rendered on its own as soon as it resolves.
    ///
    /// Returns the handles of the four tasks; the ticker drops them.
    pub fn refresh_stats(self: &Arc<Self>) -> Vec<JoinHandle<()>> {
        vec![
            spawn_stat("hourly", Arc::clone(self).refresh_hourly()),
            spawn_stat("summary", Arc::clone(self).refresh_summary()),
            spawn_stat("users", Arc::clone(self).refresh_users()),
            spawn_stat("denials", Arc::clone(self).refresh_denials()),
        ]
    }

    async fn refresh_hourly(self: Arc<Self>) -> Result<(), FetchError> {
        let stats = self.backend.fetch_hourly().await?;
        self.chart.replace(&ChartDataset::from_hourly(&stats.hourly));
        Ok(())
    }

    async fn refresh_summary(self: Arc<Self>) -> Result<(), FetchError> {
        let summary = self.backend.fetch_summary().await?;
        self.view.show_stats_summary(&summary);
        Ok(())
    }

    async fn refresh_users(self: Arc<Self>) -> Result<(), FetchError> {
        let users = self.backend.fetch_users().await?;
        self.view.show_users(&users);
        Ok(())
    }

    async fn refresh_denials(self: Arc<Self>) -> Result<(), FetchError> {
        let denials = self.backend.fetch_denials().await?;
        self.view.show_denials(&denials);
        Ok(())
    }
}

fn spawn_stat<F>(stat: &'static str, fetch: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), FetchError>> + Send + 'static,
{
    tokio::spawn(async move {
        match fetch.await {
            Ok(()) => tracing::debug!(stat, "statistics refreshed"),
            Err(err) => {
                tracing::warn!(stat, %err, endpoint = err.endpoint(), "statistics fetch failed");
            }
        }
    })
}

/// Running tickers. Dropping the handle leaves them running; call
/// [`shutdown`](Self::shutdown) to stop them.
pub struct PollerHandle<C: ChartHandle> {
    tickers: Vec<JoinHandle<()>>,
    chart: Arc<C>,
}

impl<C: ChartHandle> PollerHandle<C> {
    /// Stop both tickers and dispose the chart.
    ///
    /// Requests already in flight are left to complete.
    pub fn shutdown(self) {
        for ticker in &self.tickers {
            ticker.abort();
        }
        self.chart.dispose();
        tracing::info!("poller stopped");
    }
}
