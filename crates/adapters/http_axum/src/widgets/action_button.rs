//! Action buttons as zero-JS forms.

use askama::Template;
use vlab_dashboard_domain::action::{ActionKind, ButtonView};

use super::render;

/// Route that receives clicks on the button of `kind`.
#[must_use]
pub fn action_path(kind: ActionKind) -> String {
    format!("/actions/{}", kind.slug())
}

#[derive(Template)]
#[template(path = "widgets/action_button.html")]
struct ActionButtonTemplate<'a> {
    slug: &'static str,
    label: &'a str,
    disabled: bool,
}

#[must_use]
pub fn render_action_button(kind: ActionKind, button: &ButtonView) -> String {
    render(&ActionButtonTemplate {
        slug: kind.slug(),
        label: &button.label,
        disabled: button.disabled,
    })
}
