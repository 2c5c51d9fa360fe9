//! # vlab-dashboard-adapter-backend-reqwest
//!
//! Driven adapter implementing [`DashboardBackend`] over HTTP with
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Issue one request per port method against the board-pool service
//! - Classify every failure into a [`FetchError`]: the request never left or
//!   never came back (`Transport`), the server answered non-2xx (`Status`),
//!   or the body was not the expected JSON (`Decode`)
//! - Keep trigger rejections readable: an `ok: false` body is returned as a
//!   rejection whatever the status code
//!
//! ## Dependency rule
//! Depends on `vlab-dashboard-app` for the port trait and on
//! `vlab-dashboard-domain` for the payload types. No reqwest type leaks out.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use vlab_dashboard_app::ports::DashboardBackend;
use vlab_dashboard_domain::action::{ActionKind, TriggerResponse};
use vlab_dashboard_domain::board::BoardsPayload;
use vlab_dashboard_domain::error::FetchError;
use vlab_dashboard_domain::stats::{DenialLog, HourlyStats, StatsSummary, UserStats};

pub const BOARDS_PATH: &str = "/api/boards";
pub const HOURLY_PATH: &str = "/api/stats/hourly";
pub const SUMMARY_PATH: &str = "/api/stats/summary";
pub const USERS_PATH: &str = "/api/stats/users";
pub const DENIALS_PATH: &str = "/api/stats/denials";
pub const HWTEST_TRIGGER_PATH: &str = "/api/hwtest/trigger";
pub const CONFIG_RELOAD_PATH: &str = "/api/config/reload";

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Trigger endpoint of an action.
#[must_use]
pub fn trigger_path(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::HardwareTest => HWTEST_TRIGGER_PATH,
        ActionKind::ConfigReload => CONFIG_RELOAD_PATH,
    }
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error when the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, FetchError> {
        let (status, body) = receive(endpoint, self.http.get(self.url(endpoint))).await?;
        if !status.is_success() {
            return Err(status_error(endpoint, status));
        }
        decode(endpoint, &body)
    }

    /// POST to a trigger endpoint. The backend answers some rejections with
    /// a non-2xx status and an `{"ok": false, "error": ...}` body; those
    /// are returned as the rejection they carry.
    async fn post_trigger(&self, endpoint: &'static str) -> Result<TriggerResponse, FetchError> {
        let (status, body) = receive(endpoint, self.http.post(self.url(endpoint))).await?;
        if status.is_success() {
            return decode(endpoint, &body);
        }
        match serde_json::from_slice::<TriggerResponse>(&body) {
            Ok(response) if !response.ok => {
                tracing::debug!(endpoint, %status, "trigger rejected");
                Ok(response)
            }
            _ => Err(status_error(endpoint, status)),
        }
    }
}

async fn receive(
    endpoint: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<(StatusCode, Vec<u8>), FetchError> {
    let response = request
        .send()
        .await
        .map_err(|err| transport(endpoint, &err))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| transport(endpoint, &err))?;
    tracing::trace!(endpoint, %status, bytes = body.len(), "response received");
    Ok((status, body.to_vec()))
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|err| FetchError::Decode {
        endpoint,
        message: err.to_string(),
    })
}

fn status_error(endpoint: &'static str, status: StatusCode) -> FetchError {
    FetchError::Status {
        endpoint,
        status: status.as_u16(),
    }
}

fn transport(endpoint: &'static str, err: &reqwest::Error) -> FetchError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    FetchError::Transport { endpoint, message }
}

impl DashboardBackend for HttpBackend {
    async fn fetch_boards(&self) -> Result<BoardsPayload, FetchError> {
        self.get_json(BOARDS_PATH).await
    }

    async fn fetch_hourly(&self) -> Result<HourlyStats, FetchError> {
        self.get_json(HOURLY_PATH).await
    }

    async fn fetch_summary(&self) -> Result<StatsSummary, FetchError> {
        self.get_json(SUMMARY_PATH).await
    }

    async fn fetch_users(&self) -> Result<UserStats, FetchError> {
        self.get_json(USERS_PATH).await
    }

    async fn fetch_denials(&self) -> Result<DenialLog, FetchError> {
        self.get_json(DENIALS_PATH).await
    }

    async fn trigger(&self, kind: ActionKind) -> Result<TriggerResponse, FetchError> {
        self.post_trigger(trigger_path(kind)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> HttpBackend {
        HttpBackend::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn should_strip_trailing_slash_from_base_url() {
        let backend = client("http://127.0.0.1:5000/");
        assert_eq!(backend.base_url(), "http://127.0.0.1:5000");
        assert_eq!(backend.url(BOARDS_PATH), "http://127.0.0.1:5000/api/boards");
    }

    #[test]
    fn should_route_each_action_to_its_trigger_endpoint() {
        assert_eq!(trigger_path(ActionKind::HardwareTest), "/api/hwtest/trigger");
        assert_eq!(trigger_path(ActionKind::ConfigReload), "/api/config/reload");
    }

    #[tokio::test]
    async fn should_decode_boards_payload() {
        let router = Router::new().route(
            BOARDS_PATH,
            get(|| async {
                Json(json!({
                    "totals": {"total": 1, "available": 1},
                    "boards": [{"boardclass": "vlab_zybo-z7", "serial": "A1", "server": "relay1", "port": 5000, "status": "available"}],
                    "summary": {},
                    "redis_ok": true,
                    "hwtest_running": false,
                    "hwtest_trigger": true,
                    "config_reload_pending": false
                }))
            }),
        );
        let backend = client(&serve(router).await);

        let payload = backend.fetch_boards().await.unwrap();

        assert_eq!(payload.boards.len(), 1);
        assert_eq!(payload.boards[0].port, "5000");
        assert!(payload.redis_ok);
        assert!(payload.hwtest_trigger);
    }

    #[tokio::test]
    async fn should_fetch_every_statistic() {
        let router = Router::new()
            .route(
                HOURLY_PATH,
                get(|| async { Json(json!({"hourly": [{"hour": "2026-02-16 14:00", "locks": 2}]})) }),
            )
            .route(
                SUMMARY_PATH,
                get(|| async { Json(json!({"denials_today": 4})) }),
            )
            .route(
                USERS_PATH,
                get(|| async { Json(json!({"users": [{"user": "ian", "count": 1, "total_time_s": 60, "avg_time_s": 60}]})) }),
            )
            .route(
                DENIALS_PATH,
                get(|| async { Json(json!({"denials": [{"timestamp": 1_771_250_400, "user": "ian", "boardclass": "vlab_zybo-z7"}]})) }),
            );
        let backend = client(&serve(router).await);

        assert_eq!(backend.fetch_hourly().await.unwrap().hourly[0].locks, 2);
        assert_eq!(backend.fetch_summary().await.unwrap().denials_today, 4);
        assert_eq!(backend.fetch_users().await.unwrap().users[0].user, "ian");
        assert_eq!(backend.fetch_denials().await.unwrap().denials.len(), 1);
    }

    #[tokio::test]
    async fn should_post_trigger_and_return_rejection_body() {
        let router = Router::new().route(
            HWTEST_TRIGGER_PATH,
            post(|| async { Json(json!({"ok": false, "error": "Test already queued"})) }),
        );
        let backend = client(&serve(router).await);

        let response = backend.trigger(ActionKind::HardwareTest).await.unwrap();

        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("Test already queued"));
    }

    #[tokio::test]
    async fn should_return_rejection_body_sent_with_error_status() {
        let router = Router::new().route(
            CONFIG_RELOAD_PATH,
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"ok": false, "error": "Redis unavailable"})),
                )
            }),
        );
        let backend = client(&serve(router).await);

        let response = backend.trigger(ActionKind::ConfigReload).await.unwrap();

        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("Redis unavailable"));
    }

    #[tokio::test]
    async fn should_report_status_error_when_trigger_fails_without_json() {
        let router = Router::new().route(
            HWTEST_TRIGGER_PATH,
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let backend = client(&serve(router).await);

        let err = backend.trigger(ActionKind::HardwareTest).await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Status {
                endpoint: HWTEST_TRIGGER_PATH,
                status: 500
            }
        );
    }

    #[tokio::test]
    async fn should_report_status_error_when_not_success() {
        let router = Router::new().route(
            BOARDS_PATH,
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "redis down") }),
        );
        let backend = client(&serve(router).await);

        let err = backend.fetch_boards().await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Status {
                endpoint: BOARDS_PATH,
                status: 503
            }
        );
    }

    #[tokio::test]
    async fn should_report_decode_error_when_body_is_not_json() {
        let router = Router::new().route(SUMMARY_PATH, get(|| async { "<html>oops</html>" }));
        let backend = client(&serve(router).await);

        let err = backend.fetch_summary().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { endpoint: SUMMARY_PATH, .. }));
    }

    #[tokio::test]
    async fn should_report_transport_error_when_backend_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = client(&format!("http://{addr}"));

        let err = backend.fetch_denials().await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { endpoint: DENIALS_PATH, .. }));
    }
}
