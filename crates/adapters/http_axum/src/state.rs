//! Shared application state for axum handlers.

use std::sync::Arc;

use vlab_dashboard_app::ports::DashboardBackend;
use vlab_dashboard_app::services::ActionController;
use vlab_dashboard_domain::action::ActionKind;

use crate::document::Document;

/// Application state shared across all axum handlers.
///
/// Generic over the backend to avoid dynamic dispatch. `Clone` is
/// implemented manually so the backend itself does not need to be `Clone`.
pub struct AppState<B> {
    /// Rendered dashboard targets.
    pub document: Arc<Document>,
    /// Controller of the hardware-test button.
    pub hwtest: Arc<ActionController<B, Document>>,
    /// Controller of the config-reload button.
    pub config_reload: Arc<ActionController<B, Document>>,
    /// Value of the page's `<meta http-equiv="refresh">`.
    pub refresh_secs: u32,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            document: Arc::clone(&self.document),
            hwtest: Arc::clone(&self.hwtest),
            config_reload: Arc::clone(&self.config_reload),
            refresh_secs: self.refresh_secs,
        }
    }
}

impl<B> AppState<B>
where
    B: DashboardBackend + 'static,
{
    pub fn new(
        document: Arc<Document>,
        hwtest: Arc<ActionController<B, Document>>,
        config_reload: Arc<ActionController<B, Document>>,
        refresh_secs: u32,
    ) -> Self {
        Self {
            document,
            hwtest,
            config_reload,
            refresh_secs,
        }
    }

    /// The controller driving the button of `kind`.
    #[must_use]
    pub fn controller(&self, kind: ActionKind) -> &Arc<ActionController<B, Document>> {
        match kind {
            ActionKind::HardwareTest => &self.hwtest,
            ActionKind::ConfigReload => &self.config_reload,
        }
    }
}
