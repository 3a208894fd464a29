//! Feed error types

use thiserror::Error;

use crate::roster::RosterError;

/// Errors raised while subscribing to or handling a feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Feed returned status {0}")]
    Status(u16),

    /// Roster payload could not be rendered
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Commit payload could not be decoded
    #[error("Invalid commit payload: {0}")]
    Commit(#[source] serde_json::Error),

    /// Output write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The consumer behind a handler has gone away
    #[error("Feed consumer closed")]
    Closed,

    /// Reconnect budget exhausted
    #[error("Gave up after {0} reconnect attempts")]
    ReconnectLimit(u32),
}

impl FeedError {
    /// Errors that end the subscription instead of skipping one message
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedError::Closed | FeedError::ReconnectLimit(_))
    }
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(FeedError::Closed.is_fatal());
        assert!(FeedError::ReconnectLimit(3).is_fatal());
        assert!(!FeedError::Status(502).is_fatal());

        let bad = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert!(!FeedError::Commit(bad).is_fatal());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(FeedError::Status(404).to_string(), "Feed returned status 404");
        assert_eq!(
            FeedError::ReconnectLimit(5).to_string(),
            "Gave up after 5 reconnect attempts"
        );
    }
}
