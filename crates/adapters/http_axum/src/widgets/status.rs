//! Connectivity banner and last-updated heartbeat.

use askama::Template;
use vlab_dashboard_domain::format::format_clock;
use vlab_dashboard_domain::time::LocalTime;

use super::render;

#[derive(Template)]
#[template(path = "widgets/banner.html")]
struct BannerTemplate {
    ok: bool,
}

#[must_use]
pub fn render_connectivity(ok: bool) -> String {
    render(&BannerTemplate { ok })
}

/// Plain text; the page escapes it.
#[must_use]
pub fn render_last_updated(at: &LocalTime) -> String {
    format!("Updated {}", format_clock(at))
}
