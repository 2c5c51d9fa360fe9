//! Chart port — the hourly histogram chart instance.
//!
//! The handle is created once at startup and handed to the poller, which
//! feeds it on every statistics cycle. Teardown disposes it explicitly.

use vlab_dashboard_domain::chart::ChartDataset;

/// An initialised chart that can be fed whole datasets.
pub trait ChartHandle: Send + Sync {
    /// Replace the entire dataset (labels and values) and redraw.
    fn replace(&self, dataset: &ChartDataset);

    /// Release the chart. Later [`replace`](Self::replace) calls are ignored.
    fn dispose(&self);
}
