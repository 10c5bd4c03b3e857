//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur when talking to the mail backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout, malformed body).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("backend returned status {code}")]
    Status {
        /// HTTP status code as reported by the backend.
        code: u16,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The configured base URL could not be parsed or extended.
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

impl Error {
    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
