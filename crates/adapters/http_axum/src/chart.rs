//! Hourly session chart drawn as inline SVG with plotters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use plotters::prelude::*;
use vlab_dashboard_app::ports::ChartHandle;
use vlab_dashboard_domain::chart::{ChartDataset, SERIES_NAME};

use crate::document::Document;

pub const EMPTY_CHART: &str = r#"<p class="empty">No hourly data</p>"#;

const BAR_COLOR: RGBColor = RGBColor(79, 70, 229);

/// Drawing failure inside plotters.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

/// Chart handle that renders each dataset into the document's chart slot.
pub struct SvgChart {
    document: Arc<Document>,
    size: (u32, u32),
    disposed: AtomicBool,
}

impl SvgChart {
    pub const DEFAULT_SIZE: (u32, u32) = (960, 280);

    /// Initialise the chart with an empty dataset.
    pub fn new(document: Arc<Document>, size: (u32, u32)) -> Self {
        document.set_chart(EMPTY_CHART.to_string());
        Self {
            document,
            size,
            disposed: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl ChartHandle for SvgChart {
    fn replace(&self, dataset: &ChartDataset) {
        if self.is_disposed() {
            tracing::debug!("chart disposed, dataset dropped");
            return;
        }
        if dataset.is_empty() {
            self.document.set_chart(EMPTY_CHART.to_string());
            return;
        }
        match render_svg(dataset, self.size) {
            Ok(svg) => self.document.set_chart(svg),
            Err(err) => tracing::warn!(%err, "chart left unchanged"),
        }
    }

    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            self.document.set_chart(String::new());
        }
    }
}

/// Draw `dataset` as a bar chart. Thinned-out category labels are left blank.
///
/// # Errors
///
/// Returns [`ChartError::Draw`] when plotters fails to lay out or emit the
/// chart.
pub fn render_svg(dataset: &ChartDataset, size: (u32, u32)) -> Result<String, ChartError> {
    let buckets = u32::try_from(dataset.len()).unwrap_or(u32::MAX);
    let y_max = y_range_end(dataset.max_value());
    let label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(index) => usize::try_from(*index)
            .ok()
            .and_then(|index| dataset.tick_label(index))
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(40)
            .build_cartesian_2d((0..buckets).into_segmented(), 0..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(dataset.len())
            .x_label_formatter(&label)
            .y_desc(SERIES_NAME)
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.mix(0.6).filled())
                    .margin(2)
                    .data(
                        dataset
                            .values()
                            .iter()
                            .zip(0..buckets)
                            .map(|(value, index)| (index, *value)),
                    ),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }
    Ok(svg)
}

/// Exclusive end of the y axis: one above the tallest bar, at least 2.
fn y_range_end(max_value: u64) -> u64 {
    max_value.max(1).saturating_add(1)
}

fn draw_error(err: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(err.to_string())
}
