//! Render pipeline: pure functions from payload to markup.
//!
//! Every function returns the whole content of one render target and depends
//! on nothing but its arguments, so rendering the same payload twice yields
//! byte-identical markup. Markup lives in askama templates under
//! `templates/widgets/`, which escape every interpolated value.

use askama::Template;

pub mod action_button;
pub mod badge;
pub mod board_table;
pub mod boardclass_summary;
pub mod cards;
pub mod denials;
pub mod status;
pub mod user_table;

/// Markup shown in a table body before its first successful fetch.
pub(crate) fn loading_row(colspan: u8) -> String {
    format!(r#"<tr><td colspan="{colspan}" class="empty">Loading...</td></tr>"#)
}

/// Render a widget template. A failure leaves the target empty.
pub(crate) fn render(template: &impl Template) -> String {
    template.render().unwrap_or_else(|err| {
        tracing::warn!(%err, "widget template failed to render");
        String::new()
    })
}
