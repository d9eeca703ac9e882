//! Structured logging setup for tilefinder
//!
//! Initialises the `tracing` ecosystem once per process. Output goes to stderr so
//! that listings printed on stdout stay machine-readable.
//!
//! # Example
//!
//! ```no_run
//! use tilefinder::util::logging;
//! use tracing::{debug, info};
//!
//! logging::init_logging(logging::LoggingConfig::from_env());
//!
//! info!("Fetching live configuration");
//! debug!(layer = "oneinch2nd", "Classified block");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., tilefinder::extract) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Level from `TILEFINDER_LOG_LEVEL`, JSON output when `TILEFINDER_LOG_JSON=true`
    pub fn from_env() -> Self {
        Self::from_settings(
            env::var("TILEFINDER_LOG_LEVEL").ok().as_deref(),
            env::var("TILEFINDER_LOG_JSON").ok().as_deref(),
        )
    }

    fn from_settings(level: Option<&str>, json: Option<&str>) -> Self {
        Self {
            level: level.map(parse_level).unwrap_or(Level::INFO),
            use_json: json.and_then(|v| v.parse::<bool>().ok()).unwrap_or(false),
            ..Default::default()
        }
    }
}

/// Parses a log level from a string, falling back to `Level::INFO`
///
/// ```
/// use tilefinder::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    if let Ok(directive) = format!("tilefinder={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // Quiet the HTTP stack unless RUST_LOG asks for it
    if env::var("RUST_LOG").is_err() {
        for noisy in ["hyper=warn", "hyper_util=warn", "reqwest=warn"] {
            if let Ok(directive) = noisy.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    filter
}

/// Initializes the logging system. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    fn test_settings_from_environment_values() {
        let config = LoggingConfig::from_settings(Some("warn"), Some("true"));
        assert_eq!(config.level, Level::WARN);
        assert!(config.use_json);
        assert!(config.include_target);
    }

    #[test]
    fn test_settings_default_when_unset_or_invalid() {
        let config = LoggingConfig::from_settings(None, Some("yes"));
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
    }
}
