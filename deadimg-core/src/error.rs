//! Typed error handling for deadimg.
//!
//! Library consumers can match on these variants. In particular a build hook
//! can tell the build-halting [`DeadimgError::UnusedImages`] apart from
//! genuine I/O or configuration failures.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deadimg operations.
#[derive(Error, Debug)]
pub enum DeadimgError {
    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid exclude glob
    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Report could not be serialized or written
    #[error("Report error at {path}: {message}")]
    Report { path: PathBuf, message: String },

    /// Unused images were found and the fail-on-unused policy is active.
    ///
    /// Raised only after the report has been written.
    #[error("Found {count} unused image(s)")]
    UnusedImages { count: usize },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DeadimgError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a report error.
    pub fn report(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Report {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error is the fail-on-unused build gate rather than a fault.
    pub fn is_unused_images(&self) -> bool {
        matches!(self, Self::UnusedImages { .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::Report { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for deadimg results.
pub type DeadimgResult<T> = Result<T, DeadimgError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DeadimgResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DeadimgResult<T> {
        self.map_err(|e| DeadimgError::io(path, e))
    }
}
