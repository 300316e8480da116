/// Core error types for Shelf
use crate::types::MembershipId;
use thiserror::Error;

/// Result type alias using `ShelfError`
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Input rejected before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No bearer credential is available
    #[error("Authentication required")]
    AuthRequired,

    /// The server already holds the entry (duplicate add)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Transport-level failure (connect, timeout, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The operation's cancellation token fired before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// A removal of the same membership has not settled yet
    #[error("Removal already in progress for membership {0}")]
    RemovalInProgress(MembershipId),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShelfError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Rejected before reaching the network; retrying without fixing input is pointless.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::AuthRequired)
    }

    /// Duplicate add reported by the server.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Failure that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ShelfError::AuthRequired.is_precondition());
        assert!(ShelfError::invalid_input("empty name").is_precondition());
        assert!(!ShelfError::Cancelled.is_precondition());

        assert!(ShelfError::Conflict("already listed".into()).is_conflict());

        assert!(ShelfError::network("reset").is_transient());
        assert!(ShelfError::Server {
            status: 503,
            message: String::new()
        }
        .is_transient());
        assert!(!ShelfError::Server {
            status: 400,
            message: String::new()
        }
        .is_transient());
    }

    #[test]
    fn removal_in_progress_names_membership() {
        let err = ShelfError::RemovalInProgress(MembershipId::new(42));
        assert_eq!(
            err.to_string(),
            "Removal already in progress for membership 42"
        );
    }
}
