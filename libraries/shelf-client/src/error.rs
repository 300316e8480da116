//! Error types for the Shelf HTTP client.

use shelf_core::ShelfError;
use thiserror::Error;

/// Errors that can occur when talking to the list API or a metadata provider.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Server rejected the write because the entry already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Cancellation token fired while the request was in flight
    #[error("Request cancelled")]
    Cancelled,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for ShelfError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) => ShelfError::Network(e.to_string()),
            ClientError::ServerUnreachable(msg) => ShelfError::Network(msg),
            ClientError::ServerError { status, message } => ShelfError::Server { status, message },
            ClientError::AuthRequired => ShelfError::AuthRequired,
            ClientError::Conflict(msg) => ShelfError::Conflict(msg),
            ClientError::NotFound(what) => ShelfError::not_found("resource", what),
            ClientError::InvalidUrl(msg) => ShelfError::Config(msg),
            ClientError::ParseError(msg) => ShelfError::Parse(msg),
            ClientError::Cancelled => ShelfError::Cancelled,
        }
    }
}
