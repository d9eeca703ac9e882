//! Utility modules for tilefinder
//!
//! Currently this is the structured logging setup shared by the binary and tests.

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
