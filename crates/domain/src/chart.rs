//! Chart dataset for the hourly session histogram.
//!
//! The dataset is rebuilt from scratch on every statistics cycle. Only the
//! axis labels are thinned; every bucket keeps its bar.

use serde::Serialize;

use crate::format::format_hour_label;
use crate::stats::HourlyStat;

/// Upper bound on visible category labels along the x axis.
pub const MAX_VISIBLE_TICKS: usize = 12;

/// Name of the single series in the chart.
pub const SERIES_NAME: &str = "Sessions Started";

/// Show every `stride`-th label: `max(1, floor(buckets / MAX_VISIBLE_TICKS))`.
#[must_use]
pub fn tick_stride(buckets: usize) -> usize {
    (buckets / MAX_VISIBLE_TICKS).max(1)
}

/// Category axis plus one value per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    labels: Vec<String>,
    values: Vec<u64>,
}

impl ChartDataset {
    /// Build the dataset from the hourly histogram, preserving its order.
    #[must_use]
    pub fn from_hourly(hourly: &[HourlyStat]) -> Self {
        let (labels, values) = hourly
            .iter()
            .map(|bucket| (bucket.hour.clone(), bucket.locks))
            .unzip();
        Self { labels, values }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest bar, `0` for an empty dataset.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        tick_stride(self.len())
    }

    #[must_use]
    pub fn is_tick_visible(&self, index: usize) -> bool {
        index < self.len() && index % self.stride() == 0
    }

    /// Indices whose label is drawn.
    #[must_use]
    pub fn visible_ticks(&self) -> Vec<usize> {
        (0..self.len()).step_by(self.stride()).collect()
    }

    /// Display text for the label at `index`, or `None` when it is thinned out.
    #[must_use]
    pub fn tick_label(&self, index: usize) -> Option<String> {
        if !self.is_tick_visible(index) {
            return None;
        }
        self.labels.get(index).map(|label| format_hour_label(label))
    }
}
