//! Configuration loading and constants.
//!
//! Loads optional TOML configuration and defines constants for probe names,
//! timestamp formatting, the simulated-failure delay, startup limits and
//! default paths. `AppConfig` is the root configuration struct.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// Probe Constants
// =============================================================================

/// Probe clock key recorded when the startup task finishes
pub const STARTUP_PROBE: &str = "startupProbe";

/// Probe clock key recorded on the first successful liveness check
pub const LIVENESS_PROBE: &str = "livenessProbe";

/// Format of recorded timestamps and of the startup marker (`YYYY-MM-DDTHH:MM:SS`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Artificial latency before answering a liveness check while its failure toggle is on
pub const LIVENESS_FAILURE_DELAY: Duration = Duration::from_secs(2);

/// Wall-clock cap on the prime search, regardless of the requested count
pub const PRIME_SEARCH_BUDGET: Duration = Duration::from_secs(60);

/// Probe responses must never be served from a cache
pub const CACHE_CONTROL_PROBES: &str = "no-store";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Environment variable holding the startup count
pub const STARTUP_COUNT_ENV: &str = "PRIME_NUMBER_COUNT";

/// Default location of the startup marker file
pub const DEFAULT_MARKER_PATH: &str = "/tmp/startup-file";

/// Default HTTP bind host
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "valkyrie=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Startup simulation settings
    #[serde(default)]
    pub startup: StartupConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

/// How the startup task spends its time before reporting completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    /// Count primes by trial division (CPU-bound)
    #[default]
    Primes,
    /// Sleep for a number of seconds
    Sleep,
}

/// Startup simulation settings.
///
/// The size of the simulation (prime count or seconds) is not part of the file;
/// it always comes from the command line or `PRIME_NUMBER_COUNT`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartupConfig {
    #[serde(default)]
    pub mode: StartupMode,
    /// Where the completion marker is written
    #[serde(default = "StartupConfig::default_marker_path")]
    pub marker_path: PathBuf,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            mode: StartupMode::default(),
            marker_path: Self::default_marker_path(),
        }
    }
}

impl StartupConfig {
    fn default_marker_path() -> PathBuf {
        PathBuf::from(DEFAULT_MARKER_PATH)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be a non-zero port number".to_string(),
            ));
        }

        if self.startup.marker_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "startup.marker_path must not be empty".to_string(),
            ));
        }

        match self.logging.format.to_ascii_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.startup.mode, StartupMode::Primes);
        assert_eq!(config.startup.marker_path, PathBuf::from(DEFAULT_MARKER_PATH));
        assert!(!config.logging.is_json());
    }

    #[test]
    fn parses_all_sections() {
        let config = AppConfig::from_toml(
            r#"
            [http]
            host = "127.0.0.1"
            port = 9090

            [startup]
            mode = "sleep"
            marker_path = "/var/run/valkyrie/started"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.startup.mode, StartupMode::Sleep);
        assert_eq!(
            config.startup.marker_path,
            PathBuf::from("/var/run/valkyrie/started")
        );
        assert!(config.logging.is_json());
    }

    #[test]
    fn rejects_unknown_startup_mode() {
        let err = AppConfig::from_toml("[startup]\nmode = \"spin\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_port() {
        let err = AppConfig::from_toml("[http]\nport = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_empty_marker_path() {
        let err = AppConfig::from_toml("[startup]\nmarker_path = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn bundled_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
        let config = AppConfig::load(path).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.startup.mode, StartupMode::Primes);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
