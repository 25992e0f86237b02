//! Error types for the location database.

use thiserror::Error;

/// Result type alias using the location database's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for location database operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not an accepted map-share URL
    #[error("Invalid maps URL: {0}")]
    InvalidUrl(String),

    /// Vault path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Vault path escapes the vault or is otherwise unusable
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Vault path is already occupied
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Mapping service rejected the request because of rate limiting
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Mapping service call failed
    #[error("Provisioning error: {0}")]
    Provisioning(String),

    /// Clipboard could not be read
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error came from the mapping service rather than local state.
    pub fn is_provisioning(&self) -> bool {
        matches!(
            self,
            Error::RateLimited(_) | Error::Provisioning(_) | Error::Request(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
