//! Configuration management for tilefinder
//!
//! Settings are loaded from environment variables with sensible defaults. Command line
//! flags override individual values after loading.
//!
//! # Environment Variables
//!
//! - `TILEFINDER_STATUS_URL`: Status page advertising the live configuration file -
//!   default: "https://maps.nls.uk/geo/version"
//! - `TILEFINDER_WFS_URL`: Feature service endpoint - default:
//!   "https://geoserver.nls.uk/geoserver/wfs"
//! - `TILEFINDER_WFS_VERSION`: Feature service protocol version - default: "1.1.0"
//! - `TILEFINDER_REQUEST_TIMEOUT`: Per-request timeout in seconds - default: none
//! - `TILEFINDER_LOG_LEVEL`: Logging level - default: "info"
//! - `TILEFINDER_TILES_FILE`: Tile layer table - default: "nls_tilelayers.csv"
//! - `TILEFINDER_GROUPS_FILE`: Group layer table - default: "nls_grouplayers.csv"
//!
//! # Example
//!
//! ```no_run
//! use tilefinder::FinderConfig;
//!
//! let config = FinderConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_STATUS_URL: &str = "https://maps.nls.uk/geo/version";
pub const DEFAULT_WFS_URL: &str = "https://geoserver.nls.uk/geoserver/wfs";
pub const DEFAULT_WFS_VERSION: &str = "1.1.0";
pub const DEFAULT_TILES_FILE: &str = "nls_tilelayers.csv";
pub const DEFAULT_GROUPS_FILE: &str = "nls_grouplayers.csv";
const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for tilefinder
///
/// `Default::default()` reads `TILEFINDER_*` environment variables and falls back to
/// the built-in defaults for anything unset.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Page containing the "Current live file:" link
    pub status_url: String,

    /// Feature service endpoint
    pub wfs_url: String,

    /// Feature service protocol version
    pub wfs_version: String,

    /// Optional per-request timeout; `None` means requests block until completion
    pub request_timeout_secs: Option<u64>,

    /// Tile layer table path
    pub tiles_file: PathBuf,

    /// Group layer table path
    pub groups_file: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        let status_url =
            env::var("TILEFINDER_STATUS_URL").unwrap_or_else(|_| DEFAULT_STATUS_URL.to_string());

        let wfs_url = env::var("TILEFINDER_WFS_URL").unwrap_or_else(|_| DEFAULT_WFS_URL.to_string());

        let wfs_version =
            env::var("TILEFINDER_WFS_VERSION").unwrap_or_else(|_| DEFAULT_WFS_VERSION.to_string());

        let request_timeout_secs = env::var("TILEFINDER_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        let tiles_file = env::var("TILEFINDER_TILES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TILES_FILE));

        let groups_file = env::var("TILEFINDER_GROUPS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_GROUPS_FILE));

        let log_level = env::var("TILEFINDER_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            status_url,
            wfs_url,
            wfs_version,
            request_timeout_secs,
            tiles_file,
            groups_file,
            log_level,
        }
    }
}

impl FinderConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL is not http(s), the timeout is out of range or
    /// the log level is unknown
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [("status_url", &self.status_url), ("wfs_url", &self.wfs_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ParseError {
                    field: field.to_string(),
                    error: format!("'{}' is not an http(s) URL", url),
                });
            }
        }

        if self.wfs_version.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Feature service version cannot be empty".to_string(),
            ));
        }

        if let Some(secs) = self.request_timeout_secs {
            if secs == 0 {
                return Err(ConfigError::ValidationFailed(
                    "Request timeout must be at least 1 second".to_string(),
                ));
            }
            if secs > MAX_REQUEST_TIMEOUT_SECS {
                return Err(ConfigError::ValidationFailed(
                    "Request timeout cannot exceed 10 minutes".to_string(),
                ));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> std::collections::BTreeMap<String, String> {
        let mut map = std::collections::BTreeMap::new();

        map.insert("status_url".to_string(), self.status_url.clone());
        map.insert("wfs_url".to_string(), self.wfs_url.clone());
        map.insert("wfs_version".to_string(), self.wfs_version.clone());
        if let Some(secs) = self.request_timeout_secs {
            map.insert("request_timeout_secs".to_string(), secs.to_string());
        }
        map.insert(
            "tiles_file".to_string(),
            self.tiles_file.display().to_string(),
        );
        map.insert(
            "groups_file".to_string(),
            self.groups_file.display().to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for FinderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tilefinder Configuration:")?;
        writeln!(f, "  Status URL: {}", self.status_url)?;
        writeln!(f, "  WFS URL: {} (version {})", self.wfs_url, self.wfs_version)?;
        match self.request_timeout_secs {
            Some(secs) => writeln!(f, "  Request Timeout: {}s", secs)?,
            None => writeln!(f, "  Request Timeout: none")?,
        }
        writeln!(f, "  Tiles File: {}", self.tiles_file.display())?;
        writeln!(f, "  Groups File: {}", self.groups_file.display())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn sample_config() -> FinderConfig {
        FinderConfig {
            status_url: DEFAULT_STATUS_URL.to_string(),
            wfs_url: DEFAULT_WFS_URL.to_string(),
            wfs_version: DEFAULT_WFS_VERSION.to_string(),
            request_timeout_secs: None,
            tiles_file: PathBuf::from(DEFAULT_TILES_FILE),
            groups_file: PathBuf::from(DEFAULT_GROUPS_FILE),
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("TILEFINDER_STATUS_URL"),
            EnvGuard::unset("TILEFINDER_WFS_URL"),
            EnvGuard::unset("TILEFINDER_WFS_VERSION"),
            EnvGuard::unset("TILEFINDER_REQUEST_TIMEOUT"),
            EnvGuard::unset("TILEFINDER_TILES_FILE"),
            EnvGuard::unset("TILEFINDER_GROUPS_FILE"),
            EnvGuard::unset("TILEFINDER_LOG_LEVEL"),
        ];

        let config = FinderConfig::default();

        assert_eq!(config.status_url, DEFAULT_STATUS_URL);
        assert_eq!(config.wfs_url, DEFAULT_WFS_URL);
        assert_eq!(config.wfs_version, DEFAULT_WFS_VERSION);
        assert!(config.request_timeout_secs.is_none());
        assert_eq!(config.tiles_file, PathBuf::from(DEFAULT_TILES_FILE));
        assert_eq!(config.groups_file, PathBuf::from(DEFAULT_GROUPS_FILE));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("TILEFINDER_STATUS_URL", "http://localhost/version"),
            EnvGuard::set("TILEFINDER_WFS_URL", "http://localhost/wfs"),
            EnvGuard::set("TILEFINDER_REQUEST_TIMEOUT", "45"),
            EnvGuard::set("TILEFINDER_TILES_FILE", "tiles.csv"),
            EnvGuard::set("TILEFINDER_LOG_LEVEL", "DEBUG"),
        ];

        let config = FinderConfig::default();

        assert_eq!(config.status_url, "http://localhost/version");
        assert_eq!(config.wfs_url, "http://localhost/wfs");
        assert_eq!(config.request_timeout_secs, Some(45));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(45)));
        assert_eq!(config.tiles_file, PathBuf::from("tiles.csv"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_configuration_validation_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_configuration_validation_invalid_url() {
        let mut config = sample_config();
        config.wfs_url = "ftp://example.org/wfs".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ParseError { ref field, .. }) if field == "wfs_url"
        ));
    }

    #[test]
    fn test_configuration_validation_invalid_timeout() {
        let mut config = sample_config();
        config.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.request_timeout_secs = Some(601);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let mut config = sample_config();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", sample_config());
        assert!(display.contains("Tilefinder Configuration:"));
        assert!(display.contains("Request Timeout: none"));
    }

    #[test]
    fn test_display_map_omits_unset_timeout() {
        let map = sample_config().to_display_map();
        assert!(!map.contains_key("request_timeout_secs"));
        assert_eq!(map.get("wfs_version").map(String::as_str), Some("1.1.0"));
    }
}
