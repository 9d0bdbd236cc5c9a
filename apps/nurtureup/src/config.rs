//! # Configuration
//!
//! Settings for the HTTP server, the transition predictor and logging.
//!
//! Configuration is resolved in order:
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config nurtureup.toml`)
//! 3. `NURTUREUP_*` environment variables
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! rate_limit = 100
//! cors_origins = ["https://app.nurtureup.example"]
//!
//! [transition]
//! buffer_days = 14
//!
//! [logging]
//! format = "json"
//! filter = "nurtureup=debug"
//! ```
//!
//! ## Environment Variables
//!
//! - `NURTUREUP_HOST`, `NURTUREUP_PORT`
//! - `NURTUREUP_RATE_LIMIT`: requests per second, 0 disables
//! - `NURTUREUP_CORS_ORIGINS`: comma-separated origins, or `*`
//! - `NURTUREUP_BUFFER_DAYS`: default advance-notice window
//! - `NURTUREUP_LOG_FORMAT`: `text` or `json`
//! - `NURTUREUP_LOG_FILTER`: tracing filter directive

use nurtureup_core::NurtureError;
use nurtureup_core::primitives::{DEFAULT_BUFFER_DAYS, MAX_BUFFER_DAYS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum size of a configuration file (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Environment variable prefix.
const ENV_PREFIX: &str = "NURTUREUP_";

// =============================================================================
// SECTIONS
// =============================================================================

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. Empty means localhost only, `["*"]` allows all.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: 100,
            cors_origins: Vec::new(),
        }
    }
}

/// `[transition]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Default advance-notice window when a request does not name one.
    pub buffer_days: u32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            buffer_days: DEFAULT_BUFFER_DAYS,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Fallback filter when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "nurtureup=info,tower_http=debug".to_string(),
        }
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub transition: TransitionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Resolve configuration: defaults, then `path` (if any), then the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, NurtureError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, NurtureError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            NurtureError::IoError(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(NurtureError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            NurtureError::IoError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, NurtureError> {
        toml::from_str(content)
            .map_err(|e| NurtureError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Apply `NURTUREUP_*` overrides read through `lookup`.
    ///
    /// `lookup` receives the full variable name; the process environment is
    /// passed in by [`AppConfig::load`].
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), NurtureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };

        if let Some(host) = var("HOST") {
            self.server.host = host.trim().to_string();
        }
        if let Some(port) = var("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }
        if let Some(rate) = var("RATE_LIMIT") {
            self.server.rate_limit = parse_env("RATE_LIMIT", &rate)?;
        }
        if let Some(origins) = var("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(days) = var("BUFFER_DAYS") {
            self.transition.buffer_days = parse_env("BUFFER_DAYS", &days)?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            self.logging.format = match format.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                other => {
                    return Err(NurtureError::ConfigError(format!(
                        "{}LOG_FORMAT must be 'text' or 'json', got '{}'",
                        ENV_PREFIX, other
                    )));
                }
            };
        }
        if let Some(filter) = var("LOG_FILTER") {
            self.logging.filter = filter;
        }
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), NurtureError> {
        if self.server.host.trim().is_empty() {
            return Err(NurtureError::ConfigError(
                "server.host must not be empty".into(),
            ));
        }
        if self.transition.buffer_days > MAX_BUFFER_DAYS {
            return Err(NurtureError::ConfigError(format!(
                "transition.buffer_days {} exceeds maximum {}",
                self.transition.buffer_days, MAX_BUFFER_DAYS
            )));
        }
        if self.server.cors_origins.len() > 1
            && self.server.cors_origins.iter().any(|o| o == "*")
        {
            return Err(NurtureError::ConfigError(
                "server.cors_origins: '*' cannot be combined with explicit origins".into(),
            ));
        }
        Ok(())
    }

    /// `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, NurtureError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        NurtureError::ConfigError(format!("{}{}='{}': {}", ENV_PREFIX, name, value, e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.transition.buffer_days, 14);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [transition]
            buffer_days = 30
            "#,
        )
        .expect("parse");
        assert_eq!(config.transition.buffer_days, 30);
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn full_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            rate_limit = 0
            cors_origins = ["https://app.example"]

            [logging]
            format = "json"
            filter = "nurtureup=debug"
            "#,
        )
        .expect("parse");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.server.rate_limit, 0);
        assert_eq!(config.server.cors_origins, vec!["https://app.example"]);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let result = AppConfig::from_toml_str("[server\nport = ");
        assert!(matches!(result, Err(NurtureError::ConfigError(_))));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[server]\nport = 7070").expect("write");
        let config = AppConfig::from_file(file.path()).expect("load");
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = AppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(NurtureError::IoError(_))));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                ("NURTUREUP_PORT", "9100"),
                ("NURTUREUP_BUFFER_DAYS", "21"),
                ("NURTUREUP_CORS_ORIGINS", "http://a.test, http://b.test"),
                ("NURTUREUP_LOG_FORMAT", "JSON"),
            ]))
            .expect("overrides");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.transition.buffer_days, 21);
        assert_eq!(
            config.server.cors_origins,
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[("NURTUREUP_HOST", "  ")]))
            .expect("overrides");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn bad_env_values_rejected() {
        let mut config = AppConfig::default();
        assert!(
            config
                .apply_env_overrides(env(&[("NURTUREUP_PORT", "eighty")]))
                .is_err()
        );
        assert!(
            config
                .apply_env_overrides(env(&[("NURTUREUP_LOG_FORMAT", "xml")]))
                .is_err()
        );
    }

    #[test]
    fn validation_limits() {
        let mut config = AppConfig::default();
        config.transition.buffer_days = MAX_BUFFER_DAYS + 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.cors_origins = vec!["*".into(), "http://a.test".into()];
        assert!(config.validate().is_err());
    }
}
