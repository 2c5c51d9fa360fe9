//! Board table body.

use askama::Template;
use vlab_dashboard_domain::board::BoardSnapshot;
use vlab_dashboard_domain::format::{PLACEHOLDER, format_duration};

use super::badge::{Badge, hwtest_badge, hwtest_time, row_tint, status_badge};
use super::render;

pub const EMPTY_ROW: &str = r#"<tr><td colspan="7" class="empty">No boards registered</td></tr>"#;

struct BoardRow<'a> {
    board: &'a BoardSnapshot,
    tint: &'static str,
    status: Badge<'static>,
    hwtest: Badge<'a>,
    hwtest_time: String,
    user: &'a str,
    duration: String,
}

impl<'a> From<&'a BoardSnapshot> for BoardRow<'a> {
    fn from(board: &'a BoardSnapshot) -> Self {
        Self {
            board,
            tint: row_tint(board.status),
            status: status_badge(board.status),
            hwtest: hwtest_badge(board),
            hwtest_time: hwtest_time(board),
            user: board.user().unwrap_or(PLACEHOLDER),
            duration: format_duration(board.held_duration()),
        }
    }
}

#[derive(Template)]
#[template(path = "widgets/board_rows.html")]
struct BoardRowsTemplate<'a> {
    rows: Vec<BoardRow<'a>>,
}

/// One row per board, in payload order.
#[must_use]
pub fn render_board_rows(boards: &[BoardSnapshot]) -> String {
    if boards.is_empty() {
        return EMPTY_ROW.to_string();
    }
    render(&BoardRowsTemplate {
        rows: boards.iter().map(BoardRow::from).collect(),
    })
}
