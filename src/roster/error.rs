//! Roster error types
//!
//! Errors raised while decoding or laying out a roster snapshot. Any of these
//! aborts the current render pass only; the feed keeps listening.

use thiserror::Error;

/// Errors that can occur while turning a feed payload into views
#[derive(Error, Debug)]
pub enum RosterError {
    /// Payload was not valid JSON or did not match the roster shape
    #[error("Malformed roster payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A member's timezone falls outside UTC-12..UTC+12
    #[error("Timezone out of range for {member}: {timezone} (expected -12..=12)")]
    TimezoneOutOfRange { member: String, timezone: i32 },
}

/// Result type alias for roster operations
pub type RosterResult<T> = Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RosterError::TimezoneOutOfRange {
            member: "Eve".to_string(),
            timezone: 14,
        };
        assert_eq!(
            err.to_string(),
            "Timezone out of range for Eve: 14 (expected -12..=12)"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RosterError = json_err.into();
        assert!(matches!(err, RosterError::Malformed(_)));
    }
}
