//! Common error types for the adapter.

use thiserror::Error;

/// Top-level error type for adapter operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Adapter configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a non-success HTTP status.
    #[error("Upstream API error ({status}): {body}")]
    UpstreamApi {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// The provider accepted the upload but did not return the expected shape.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Transport failure or unreadable response.
    #[error("Network error: {0}")]
    Network(String),

    /// Reading a local source file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// HTTP status reported by the provider, if this is an upstream error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UpstreamApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
