//! Engine errors for malformed caller arguments.
//!
//! Degenerate-but-valid inputs (empty sample slices) are never errors; every
//! builder returns a well-formed zero-record response for them. These
//! variants cover the arguments the engine rejects outright.

use chrono::{DateTime, Utc};

/// Malformed-argument errors signalled by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Caller asked for a negative number of records.
    InvalidLimit(i64),
    /// Caller supplied a time range with `end <= start`.
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidLimit(n) => write!(f, "limit must be non-negative, got {n}"),
            EngineError::InvalidRange { start, end } => {
                write!(f, "range end ({end}) must be after start ({start})")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_messages() {
        let err = EngineError::InvalidLimit(-3);
        assert!(err.to_string().contains("-3"));

        let start = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let err = EngineError::InvalidRange { start, end };
        assert!(err.to_string().contains("must be after"));
    }
}
