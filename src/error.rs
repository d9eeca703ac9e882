//! Error types for the finder pipeline
//!
//! Extraction misses never surface here: a block that fails to classify or a field
//! that fails to match simply yields nothing. Only lookups that the caller asked for
//! explicitly, network failures and file I/O are reported.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, fetching, validating or resolving layers
#[derive(Debug, Error)]
pub enum FinderError {
    /// A required pattern match or lookup failed
    #[error("{what} not found{}", detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    NotFound {
        what: String,
        detail: Option<String>,
    },

    /// The feature service does not recognise the record's typename
    #[error("Metadata for '{name}' is unavailable (typename: {})", typename.as_deref().unwrap_or("<none>"))]
    Unavailable {
        name: String,
        typename: Option<String>,
    },

    /// Network failure while talking to the status, configuration or feature endpoint
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The capabilities document could not be parsed
    #[error("Malformed capabilities document: {0}")]
    Capabilities(String),

    /// A bounding box string could not be parsed
    #[error("Invalid bounding box '{0}': expected minx,miny,maxx,maxy[,CRS]")]
    InvalidBoundingBox(String),

    /// Reading or writing a local file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tabular file could not be read or written
    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl FinderError {
    pub fn not_found(what: impl Into<String>) -> Self {
        FinderError::NotFound {
            what: what.into(),
            detail: None,
        }
    }

    pub fn not_found_with(what: impl Into<String>, detail: impl Into<String>) -> Self {
        FinderError::NotFound {
            what: what.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn transport(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        FinderError::Transport {
            url: url.into(),
            message: err.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FinderError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FinderError::NotFound { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FinderError::Unavailable { .. })
    }

    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            FinderError::NotFound { what, .. } if what == "live configuration file" => format!(
                "Error: {}\n\n\
                Help: The status page no longer advertises a live file. Check that:\n\
                - TILEFINDER_STATUS_URL points at the provider's version page\n\
                - The page still contains the phrase 'Current live file:'",
                self
            ),
            FinderError::NotFound { .. } => format!(
                "Error: {}\n\n\
                Help: Run 'tilefinder list' to see the layers in the saved dataset,\n\
                or re-run 'tilefinder fetch' if the dataset is out of date.",
                self
            ),
            FinderError::Unavailable { .. } => format!(
                "Error: {}\n\n\
                Help: The feature service does not publish this layer. Try another\n\
                layer or pass an explicit typename via a refreshed dataset.",
                self
            ),
            FinderError::Transport { .. } => format!(
                "Error: {}\n\n\
                Help: Check network connectivity. Requests are not retried; set\n\
                TILEFINDER_REQUEST_TIMEOUT to bound slow endpoints.",
                self
            ),
            _ => format!("Error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
