// src/error.rs

//! Unified error handling for the mirror.
//!
//! Every error carries a [`Severity`]. Recoverable conditions are absorbed by
//! the component that produced them and logged as warnings; fatal conditions
//! propagate to the caller and end the current operation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Whether an error has a defined recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Logged as a warning, the operation continues.
    Recoverable,
    /// Aborts the current operation.
    Fatal,
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote service has no page with this id
    #[error("Page {0} not found")]
    NotFound(String),

    /// The id cannot name a single file inside the cache directory
    #[error("Invalid page id {0:?}: not usable as a cache key")]
    InvalidId(String),

    /// The remote service answered with a non-success status
    #[error("Remote error for {id}: HTTP {status}: {message}")]
    Remote {
        id: String,
        status: u16,
        message: String,
    },

    /// A cache entry exists but cannot be deserialized
    #[error("Corrupt cache entry for {id} at {}: {source}", .path.display())]
    CacheCorrupt {
        id: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Persisting a page to the cache failed
    #[error("Failed to write cache entry for {id}: {message}")]
    CacheWrite { id: String, message: String },

    /// Removing a cache entry or diagnostic log failed
    #[error("Failed to remove {}: {source}", .path.display())]
    CacheRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache or log directory could not be created
    #[error("Failed to initialize storage at {}: {source}", .path.display())]
    StorageInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every fetch attempt for a page failed
    #[error("Fetching {id} failed after {attempts} attempt(s): {source}")]
    FetchFailed {
        id: String,
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cache write warning.
    pub fn cache_write(id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::CacheWrite {
            id: id.into(),
            message: message.to_string(),
        }
    }

    /// Wrap the last attempt's error once the retry budget is spent.
    pub fn fetch_failed(id: impl Into<String>, attempts: u32, source: AppError) -> Self {
        Self::FetchFailed {
            id: id.into(),
            attempts,
            source: Box::new(source),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::CacheWrite { .. } | Self::CacheRemove { .. } => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
