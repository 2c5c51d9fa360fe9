//! Denial log section.

use askama::Template;
use vlab_dashboard_domain::format::format_time;
use vlab_dashboard_domain::stats::{DenialEvent, DenialLog};

use super::render;

pub const HIDDEN_SECTION: &str = r#"<section id="denials-section" hidden></section>"#;

struct DenialRow<'a> {
    time: String,
    user: &'a str,
    boardclass: &'a str,
}

impl<'a> From<&'a DenialEvent> for DenialRow<'a> {
    fn from(denial: &'a DenialEvent) -> Self {
        Self {
            time: format_time(denial.timestamp.as_ref()),
            user: &denial.user,
            boardclass: &denial.boardclass,
        }
    }
}

#[derive(Template)]
#[template(path = "widgets/denials.html")]
struct DenialsTemplate<'a> {
    rows: Vec<DenialRow<'a>>,
}

/// The whole section, hidden when there is nothing to show.
#[must_use]
pub fn render_denials(denials: &DenialLog) -> String {
    if denials.is_empty() {
        return HIDDEN_SECTION.to_string();
    }
    render(&DenialsTemplate {
        rows: denials.most_recent_first().map(DenialRow::from).collect(),
    })
}
