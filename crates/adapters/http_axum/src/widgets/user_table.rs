//! Per-user usage table body.

use askama::Template;
use vlab_dashboard_domain::format::format_duration;
use vlab_dashboard_domain::stats::{UserStat, UserStats};

use super::render;

pub const EMPTY_ROW: &str =
    r#"<tr><td colspan="4" class="empty">No session data available</td></tr>"#;

struct UserRow<'a> {
    user: &'a str,
    count: u64,
    total: String,
    average: String,
}

impl<'a> From<&'a UserStat> for UserRow<'a> {
    fn from(stat: &'a UserStat) -> Self {
        Self {
            user: &stat.user,
            count: stat.count,
            total: format_duration(Some(stat.total_time_s)),
            average: format_duration(Some(stat.avg_time_s)),
        }
    }
}

#[derive(Template)]
#[template(path = "widgets/user_rows.html")]
struct UserRowsTemplate<'a> {
    rows: Vec<UserRow<'a>>,
}

#[must_use]
pub fn render_user_rows(users: &UserStats) -> String {
    if users.users.is_empty() {
        return EMPTY_ROW.to_string();
    }
    render(&UserRowsTemplate {
        rows: users.users.iter().map(UserRow::from).collect(),
    })
}
