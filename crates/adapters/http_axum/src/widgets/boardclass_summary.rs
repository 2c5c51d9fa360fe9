//! Per-class utilization panels.

use askama::Template;
use vlab_dashboard_domain::board::{BoardclassCounts, BoardclassSummary, UtilizationLevel};

use super::render;

pub const EMPTY_SUMMARY: &str = r#"<div class="empty">No board classes</div>"#;

/// Shown before the first successful board poll.
pub const LOADING_SUMMARY: &str = r#"<div class="empty">Loading...</div>"#;

#[must_use]
pub fn bar_class(level: UtilizationLevel) -> &'static str {
    match level {
        UtilizationLevel::Low => "bar-green",
        UtilizationLevel::Elevated => "bar-amber",
        UtilizationLevel::High => "bar-red",
    }
}

struct Panel<'a> {
    name: &'a str,
    counts: &'a BoardclassCounts,
    bar: &'static str,
    percent: u64,
}

#[derive(Template)]
#[template(path = "widgets/boardclass_panels.html")]
struct PanelsTemplate<'a> {
    panels: Vec<Panel<'a>>,
}

/// One panel per class, sorted by class name.
#[must_use]
pub fn render_boardclass_summary(summary: &BoardclassSummary) -> String {
    if summary.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }
    let panels = summary
        .iter()
        .map(|(name, counts)| Panel {
            name,
            counts,
            bar: bar_class(counts.utilization_level()),
            percent: counts.utilization_percent(),
        })
        .collect();
    render(&PanelsTemplate { panels })
}
