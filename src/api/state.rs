//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::{DashboardController, DashboardDefaults};
use crate::dataset::Dataset;
use crate::websocket::{HubConfig, SessionHub};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only tables, loaded once at startup
    pub dataset: Arc<Dataset>,
    /// Selections a new session starts from
    pub defaults: Arc<DashboardDefaults>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Registry of live dashboard sessions
    pub sessions: Arc<SessionHub>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, defaults: DashboardDefaults, config: ApiConfig) -> Self {
        let hub_config = HubConfig {
            max_sessions: config.max_sessions,
        };

        Self {
            dataset,
            defaults: Arc::new(defaults),
            config: Arc::new(config),
            start_time: Instant::now(),
            sessions: Arc::new(SessionHub::new(hub_config)),
        }
    }

    /// A controller for one new dashboard session
    pub fn new_controller(&self) -> DashboardController {
        DashboardController::new(Arc::clone(&self.dataset), Arc::clone(&self.defaults))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get live session count
    pub async fn session_count(&self) -> usize {
        self.sessions.session_count().await
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum concurrent WebSocket sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
