//! JSON endpoints.

use axum::Json;
use axum::extract::State;

use vlab_dashboard_app::ports::DashboardBackend;

use crate::document::DocumentSnapshot;
use crate::state::AppState;

/// `GET /api/document`: current markup of every render target.
pub async fn document<B>(State(state): State<AppState<B>>) -> Json<DocumentSnapshot>
where
    B: DashboardBackend + 'static,
{
    Json(state.document.snapshot())
}
