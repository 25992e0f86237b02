//! cartes.io error classification.

use locdb_core::Error;

/// Failure classes reported by the mapping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartesErrorCode {
    /// Too many requests from this client.
    RateLimited,
    /// Map or endpoint not found.
    NotFound,
    /// Request body rejected.
    Validation,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl CartesErrorCode {
    /// Determine error code from HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            404 => Self::NotFound,
            422 => Self::Validation,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a cartes.io failure to a locdb Error.
pub fn to_locdb_error(code: CartesErrorCode, message: &str) -> Error {
    match code {
        CartesErrorCode::RateLimited => Error::RateLimited(message.to_string()),
        CartesErrorCode::NotFound => Error::Provisioning(format!("Not found: {}", message)),
        CartesErrorCode::Validation => {
            Error::Provisioning(format!("Rejected request: {}", message))
        }
        CartesErrorCode::ServerError => Error::Provisioning(format!("Server error: {}", message)),
        CartesErrorCode::Unknown => Error::Provisioning(message.to_string()),
    }
}
