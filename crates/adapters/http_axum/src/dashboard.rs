//! Server-side rendered dashboard page (no JavaScript).
//!
//! - `GET  /`: the dashboard, assembled from the document
//! - `POST /actions/hwtest`: click on "Run HW Test" (PRG)
//! - `POST /actions/config-reload`: click on "Reload Config" (PRG)
//!
//! The page (`templates/dashboard.html`) carries
//! `<meta http-equiv="refresh">` so the browser picks up whatever the poller
//! rendered since the last load. Slots are inserted as-is: every one of them
//! was produced by an escaping widget template.

use std::sync::Arc;

use askama::Template;
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};

use vlab_dashboard_app::ports::DashboardBackend;
use vlab_dashboard_app::services::ActionController;
use vlab_dashboard_domain::action::ActionKind;

use crate::document::{Document, DocumentSnapshot};
use crate::state::AppState;
use crate::widgets::action_button::action_path;

/// The whole dashboard, assembled from a document snapshot.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    doc: DocumentSnapshot,
}

impl DashboardTemplate {
    #[must_use]
    pub fn new(doc: DocumentSnapshot, refresh_seconds: u32) -> Self {
        Self {
            refresh_seconds,
            doc,
        }
    }
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Build the dashboard sub-router for the SSR page and its forms.
pub fn routes<B>() -> Router<AppState<B>>
where
    B: DashboardBackend + 'static,
{
    Router::new()
        .route("/", get(index::<B>))
        .route(&action_path(ActionKind::HardwareTest), post(trigger_hwtest::<B>))
        .route(
            &action_path(ActionKind::ConfigReload),
            post(trigger_config_reload::<B>),
        )
}

/// `GET /`: the whole dashboard.
pub async fn index<B>(State(state): State<AppState<B>>) -> DashboardTemplate
where
    B: DashboardBackend + 'static,
{
    DashboardTemplate::new(state.document.snapshot(), state.refresh_secs)
}

/// `POST /actions/hwtest`: request a hardware test, then back to `/`.
pub async fn trigger_hwtest<B>(State(state): State<AppState<B>>) -> Redirect
where
    B: DashboardBackend + 'static,
{
    click(state.controller(ActionKind::HardwareTest));
    Redirect::to("/")
}

/// `POST /actions/config-reload`: request a config reload, then back to `/`.
pub async fn trigger_config_reload<B>(State(state): State<AppState<B>>) -> Redirect
where
    B: DashboardBackend + 'static,
{
    click(state.controller(ActionKind::ConfigReload));
    Redirect::to("/")
}

/// Register the click and send its trigger request in the background; a
/// click on a busy button is dropped.
fn click<B>(controller: &Arc<ActionController<B, Document>>)
where
    B: DashboardBackend + 'static,
{
    if let Some(submission) = controller.click() {
        let controller = Arc::clone(controller);
        tokio::spawn(async move { controller.submit(submission).await });
    }
}
