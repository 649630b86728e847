//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiConfig;
use crate::dashboard::DashboardDefaults;
use crate::dataset::DatasetPaths;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source file locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory the file names below are resolved against
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_covid_csv")]
    pub covid_csv: String,

    #[serde(default = "default_usa_csv")]
    pub usa_csv: String,

    #[serde(default = "default_state_codes_csv")]
    pub state_codes_csv: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_covid_csv() -> String {
    "owid-covid-data.csv".to_string()
}

fn default_usa_csv() -> String {
    "USA Covid Data.csv".to_string()
}

fn default_state_codes_csv() -> String {
    "csvData.csv".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            covid_csv: default_covid_csv(),
            usa_csv: default_usa_csv(),
            state_codes_csv: default_state_codes_csv(),
        }
    }
}

impl DataConfig {
    /// Resolve the three file paths; absolute file names ignore `data_dir`
    pub fn paths(&self) -> DatasetPaths {
        let dir = Path::new(&self.data_dir);
        DatasetPaths {
            covid_csv: dir.join(&self.covid_csv),
            usa_csv: dir.join(&self.usa_csv),
            state_codes_csv: dir.join(&self.state_codes_csv),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the configured level when set.
    pub fn init_tracing(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("covidash={},tower_http=debug", self.level).into()
        });

        let registry = tracing_subscriber::registry().with(filter);
        if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("covidash").join("config.toml")),
            Some(PathBuf::from("/etc/covidash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Data overrides
        if let Some(dir) = var("COVIDASH_DATA_DIR") {
            self.data.data_dir = dir;
        }
        if let Some(path) = var("COVIDASH_COVID_CSV") {
            self.data.covid_csv = path;
        }
        if let Some(path) = var("COVIDASH_USA_CSV") {
            self.data.usa_csv = path;
        }
        if let Some(path) = var("COVIDASH_STATE_CODES_CSV") {
            self.data.state_codes_csv = path;
        }

        // API overrides
        if let Some(host) = var("COVIDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("COVIDASH_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = var("COVIDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("COVIDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Covidash Configuration
#
# Environment variables override these settings:
# - COVIDASH_DATA_DIR
# - COVIDASH_COVID_CSV
# - COVIDASH_USA_CSV
# - COVIDASH_STATE_CODES_CSV
# - COVIDASH_API_HOST
# - COVIDASH_API_PORT
# - COVIDASH_LOG_LEVEL
# - COVIDASH_LOG_FORMAT

[data]
# Directory containing the source files
data_dir = "."

# Global daily time series
covid_csv = "owid-covid-data.csv"

# US per-state summary
usa_csv = "USA Covid Data.csv"

# State name to postal code lookup
state_codes_csv = "csvData.csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8050

# Maximum concurrent dashboard sessions (WebSocket connections)
max_sessions = 1000

[dashboard]
# Line chart region on first render and when the selection is cleared
line_region = "United States"

# Initial bar chart selection
bar_regions = ["USA", "IND", "MEX", "GBR", "ITA", "JPN", "CAN", "AUS", "RUS", "FRA", "DNK", "DEU", "ISR", "BRA", "ARG", "ESP", "UKR"]

# Initial pie chart selection
pie_regions = ["USA", "IND", "MEX"]

# Substituted for an empty bar or pie selection
fallback_regions = ["USA"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
