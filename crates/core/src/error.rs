use std::path::Path;
use thiserror::Error;

/// Result type for fsserve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fsserve operations
///
/// Every failure surfaced to a caller carries one of these kinds plus a
/// message naming the offending path. The transport layer maps the kind to
/// its own error envelope.
#[derive(Error, Debug)]
pub enum Error {
    /// Path resolved outside the workspace root or matched an exclusion pattern
    #[error("access denied to {path}: only paths within the workspace can be accessed")]
    AccessDenied { path: String },

    /// Target file or directory does not exist
    #[error("not found: {path}")]
    NotFound { path: String },

    /// File content is not valid UTF-8 text
    #[error("cannot read {path} as text: the file may be binary")]
    Decode { path: String },

    /// Supplied regular expression failed to compile
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(String),

    /// Configuration related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other I/O or internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates an access-denied error for a path
    pub fn access_denied(path: impl Into<String>) -> Self {
        Self::AccessDenied { path: path.into() }
    }

    /// Creates a not-found error for a path
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a decode error for a path
    pub fn decode(path: impl Into<String>) -> Self {
        Self::Decode { path: path.into() }
    }

    /// Creates an invalid-pattern error
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        Self::InvalidPattern(msg.into())
    }

    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Maps an I/O failure on `path` to the matching error kind
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path.display().to_string())
        } else {
            Self::internal(format!("{}: {err}", path.display()))
        }
    }
}
