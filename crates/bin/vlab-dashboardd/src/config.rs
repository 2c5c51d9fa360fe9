//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `vlab-dashboard.toml` in the working directory. Every field has
//! a sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use vlab_dashboard_app::services::PollerConfig;

const CONFIG_FILE: &str = "vlab-dashboard.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Board-pool backend settings.
    pub backend: BackendConfig,
    /// Polling cadence.
    pub polling: PollingConfig,
    /// Action button behaviour.
    pub actions: ActionsConfig,
    /// Dashboard page settings.
    pub page: PageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Where the board-pool JSON API lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL, without the `/api/...` path.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub boards_interval_secs: u64,
    pub stats_interval_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// How long a rejected trigger stays on the button.
    pub error_cooldown_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// `<meta http-equiv="refresh">` interval in seconds.
    pub refresh_secs: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `vlab-dashboard.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("VLAB_DASHBOARD_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("VLAB_DASHBOARD_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        let bind = var("VLAB_DASHBOARD_BIND");
        if let Some((host, port)) = bind.as_deref().and_then(|val| val.rsplit_once(':')) {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("VLAB_DASHBOARD_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(val) = var("VLAB_DASHBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        for (name, secs) in [
            ("backend.request_timeout_secs", self.backend.request_timeout_secs),
            ("polling.boards_interval_secs", self.polling.boards_interval_secs),
            ("polling.stats_interval_secs", self.polling.stats_interval_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Validation(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.request_timeout_secs)
    }

    #[must_use]
    pub fn error_cooldown(&self) -> Duration {
        Duration::from_secs(self.actions.error_cooldown_secs)
    }

    #[must_use]
    pub fn poller(&self) -> PollerConfig {
        PollerConfig {
            boards_interval: Duration::from_secs(self.polling.boards_interval_secs),
            stats_interval: Duration::from_secs(self.polling.stats_interval_secs),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            boards_interval_secs: 10,
            stats_interval_secs: 60,
        }
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            error_cooldown_secs: 3,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self { refresh_secs: 5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "vlab_dashboardd=info,vlab_dashboard=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
