//! Summary cards.

use askama::Template;
use vlab_dashboard_domain::board::FleetTotals;
use vlab_dashboard_domain::format::PLACEHOLDER;
use vlab_dashboard_domain::stats::StatsSummary;

use super::render;

const FLEET_CARDS: [(&str, &str); 5] = [
    ("card-total", "Total Boards"),
    ("card-available", "Available"),
    ("card-locked", "In Use (Locked)"),
    ("card-unlocked", "In Use (Unlocked)"),
    ("card-hwtest-failed", "HW Test Failed"),
];

struct Card {
    id: &'static str,
    label: &'static str,
    value: String,
}

#[derive(Template)]
#[template(path = "widgets/cards.html")]
struct CardsTemplate {
    cards: Vec<Card>,
}

fn render_cards(values: impl IntoIterator<Item = ((&'static str, &'static str), String)>) -> String {
    let cards = values
        .into_iter()
        .map(|((id, label), value)| Card { id, label, value })
        .collect();
    render(&CardsTemplate { cards })
}

/// The five fleet cards, rendered verbatim from the totals.
#[must_use]
pub fn render_summary_cards(totals: &FleetTotals) -> String {
    let values = [
        totals.total,
        totals.available,
        totals.in_use_locked,
        totals.in_use_unlocked,
        totals.hwtest_failed,
    ];
    render_cards(
        FLEET_CARDS
            .into_iter()
            .zip(values.into_iter().map(|value| value.to_string())),
    )
}

/// Cards shown before the first successful board poll.
#[must_use]
pub fn render_empty_summary_cards() -> String {
    render_cards(
        FLEET_CARDS
            .into_iter()
            .map(|card| (card, PLACEHOLDER.to_string())),
    )
}

#[must_use]
pub fn render_denials_today(summary: &StatsSummary) -> String {
    render_cards([(
        ("card-denials", "Denials Today"),
        summary.denials_today.to_string(),
    )])
}

#[must_use]
pub fn render_empty_denials_today() -> String {
    render_cards([(("card-denials", "Denials Today"), PLACEHOLDER.to_string())])
}
