use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for version-headers operations
#[derive(Error, Debug)]
pub enum VersionHeaderError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Could not determine product version from '{}': {:?}", .path.display(), .contents)]
    Format { path: PathBuf, contents: String },

    #[error("History query failed: {0}")]
    Execution(String),

    #[error("Repository probe failed: {0}")]
    Probe(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-headers
pub type Result<T> = std::result::Result<T, VersionHeaderError>;

impl VersionHeaderError {
    /// Create a usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        VersionHeaderError::Usage(msg.into())
    }

    /// Create a descriptor format error naming the offending file
    pub fn format(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        VersionHeaderError::Format {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Create an execution error for a failed history query
    pub fn execution(msg: impl Into<String>) -> Self {
        VersionHeaderError::Execution(msg.into())
    }

    /// Create a probe error with context
    pub fn probe(msg: impl Into<String>) -> Self {
        VersionHeaderError::Probe(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionHeaderError::Config(msg.into())
    }
}
