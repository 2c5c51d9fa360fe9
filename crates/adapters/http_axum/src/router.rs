//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use vlab_dashboard_app::ports::DashboardBackend;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the dashboard at `/`, the document snapshot under `/api` and a
/// liveness probe at `/health`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<B>(state: AppState<B>) -> Router
where
    B: DashboardBackend + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/document", get(crate::api::document::<B>))
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
