//! # vlab-dashboardd — VLAB dashboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the backend client, the document and the chart (adapters)
//! - Construct the action controllers and the poller, injecting adapters via
//!   port traits, and start both polling cycles
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT): stop serving, stop the
//!   tickers, dispose the chart
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vlab_dashboard_adapter_backend_reqwest::HttpBackend;
use vlab_dashboard_adapter_http_axum::chart::SvgChart;
use vlab_dashboard_adapter_http_axum::document::Document;
use vlab_dashboard_adapter_http_axum::state::AppState;
use vlab_dashboard_app::services::{ActionController, Poller};
use vlab_dashboard_domain::action::ActionKind;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Backend
    let backend = Arc::new(HttpBackend::new(
        &config.backend.base_url,
        config.request_timeout(),
    )?);
    tracing::info!(base_url = backend.base_url(), "using board-pool backend");

    // View and chart
    let document = Arc::new(Document::new());
    let chart = Arc::new(SvgChart::new(
        Arc::clone(&document),
        SvgChart::DEFAULT_SIZE,
    ));

    // Services
    let controller = |kind| {
        let controller = Arc::new(ActionController::new(
            kind,
            Arc::clone(&backend),
            Arc::clone(&document),
            config.error_cooldown(),
        ));
        controller.publish();
        controller
    };
    let hwtest = controller(ActionKind::HardwareTest);
    let config_reload = controller(ActionKind::ConfigReload);

    let poller = Arc::new(Poller::new(
        Arc::clone(&backend),
        Arc::clone(&document),
        chart,
        vec![Arc::clone(&hwtest), Arc::clone(&config_reload)],
    ));
    let polling = poller.start(config.poller());

    // HTTP
    let state = AppState::new(document, hwtest, config_reload, config.page.refresh_secs);
    let app = vlab_dashboard_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "vlab-dashboardd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    polling.shutdown();
    tracing::info!("vlab-dashboardd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
