//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::roster::LayoutMetrics;
use crate::ticker::TickerTimings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feeds: FeedsConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub ticker: TickerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Event-stream endpoints and reconnection
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    #[serde(default = "default_ticker_url")]
    pub ticker_url: String,

    /// 0 keeps retrying forever
    #[serde(default)]
    pub max_reconnect_attempts: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_dashboard_url() -> String {
    "https://codejam.timeenjoyed.dev/api/teams/feed_event".to_string()
}

fn default_ticker_url() -> String {
    "https://codejam.timeenjoyed.dev/api/github/commit_feed".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            dashboard_url: default_dashboard_url(),
            ticker_url: default_ticker_url(),
            max_reconnect_attempts: 0,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl FeedsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Dashboard presentation constants
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_row_height")]
    pub row_height: f64,

    #[serde(default = "default_base_margin")]
    pub base_margin: f64,

    #[serde(default = "default_popover_gutter")]
    pub popover_gutter: f64,

    #[serde(default = "default_image_poll")]
    pub image_poll_ms: u32,
}

fn default_row_height() -> f64 {
    90.0
}

fn default_base_margin() -> f64 {
    30.0
}

fn default_popover_gutter() -> f64 {
    10.0
}

fn default_image_poll() -> u32 {
    crate::overlay::POLL_INTERVAL_MS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            base_margin: default_base_margin(),
            popover_gutter: default_popover_gutter(),
            image_poll_ms: default_image_poll(),
        }
    }
}

impl LayoutConfig {
    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            row_height: self.row_height,
            base_margin: self.base_margin,
        }
    }
}

/// Commit ticker timings
#[derive(Debug, Clone, Deserialize)]
pub struct TickerConfig {
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,

    #[serde(default = "default_max_commits")]
    pub max_commits: usize,
}

fn default_display_ms() -> u64 {
    7000
}

fn default_exit_ms() -> u64 {
    300
}

fn default_max_commits() -> usize {
    5
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            exit_ms: default_exit_ms(),
            max_commits: default_max_commits(),
        }
    }
}

impl TickerConfig {
    pub fn timings(&self) -> TickerTimings {
        TickerTimings {
            display: Duration::from_millis(self.display_ms),
            exit: Duration::from_millis(self.exit_ms),
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

    pub file: Option<String>,
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
            file: None,
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
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
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("jamfeed").join("config.toml")),
            Some(PathBuf::from("/etc/jamfeed/config.toml")),
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
        if let Ok(url) = std::env::var("JAMFEED_DASHBOARD_URL") {
            self.feeds.dashboard_url = url;
        }
        if let Ok(url) = std::env::var("JAMFEED_TICKER_URL") {
            self.feeds.ticker_url = url;
        }

        if let Ok(level) = std::env::var("JAMFEED_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("JAMFEED_LOG_FORMAT") {
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
    r#"# jamfeed Configuration
#
# Environment variables override these settings:
# - JAMFEED_DASHBOARD_URL
# - JAMFEED_TICKER_URL
# - JAMFEED_LOG_LEVEL
# - JAMFEED_LOG_FORMAT

[feeds]
# Team roster event stream
dashboard_url = "https://codejam.timeenjoyed.dev/api/teams/feed_event"

# Commit notification event stream
ticker_url = "https://codejam.timeenjoyed.dev/api/github/commit_feed"

# Give up after this many failed reconnects (0 = never give up)
max_reconnect_attempts = 0

# Connection timeout (seconds)
connect_timeout_secs = 10

[layout]
# Height of one stacked member in the timezone layout (px)
row_height = 90.0

# Gap above the first row (px)
base_margin = 30.0

# Extra space when a popover opens to the left (px)
popover_gutter = 10.0

# Avatar load polling interval (ms)
image_poll_ms = 25

[ticker]
# How long each commit card stays up (ms)
display_ms = 7000

# Fade-out before a card is detached (ms)
exit_ms = 300

# Commits listed per card
max_commits = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/jamfeed/jamfeed.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.feeds.dashboard_url, defaults.feeds.dashboard_url);
        assert_eq!(config.feeds.ticker_url, defaults.feeds.ticker_url);
        assert_eq!(config.layout.row_height, 90.0);
        assert_eq!(config.layout.base_margin, 30.0);
        assert_eq!(config.layout.image_poll_ms, 25);
        assert_eq!(config.ticker.display_ms, 7000);
        assert_eq!(config.ticker.max_commits, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[layout]\nrow_height = 60.0\n").unwrap();
        assert_eq!(config.layout.row_height, 60.0);
        assert_eq!(config.layout.base_margin, 30.0);
        assert_eq!(config.ticker.exit_ms, 300);
    }

    #[test]
    fn test_derived_settings() {
        let config = Config::default();
        assert_eq!(config.layout.metrics(), LayoutMetrics::default());
        assert_eq!(config.ticker.timings(), TickerTimings::default());
        assert_eq!(config.feeds.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[feeds]\ndashboard_url = \"http://localhost:9000/feed\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.feeds.dashboard_url, "http://localhost:9000/feed");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_error_carries_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout\nrow_height = ").unwrap();

        match Config::load(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
