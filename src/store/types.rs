//! Sample types for the occupancy analytics engine.
//!
//! A sample is one occupancy observation: when it was taken, how many people
//! were inside, and optionally whether it was triggered by an entry or exit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction tag for event-driven samples.
///
/// Present on samples produced by a discrete entry or exit event; absent on
/// periodic polls of the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// The "+1"/"-1" delta string shown in the activity log.
    pub fn count_change(&self) -> &'static str {
        match self {
            Direction::In => "+1",
            Direction::Out => "-1",
        }
    }
}

/// One occupancy observation.
///
/// Samples are append-only: the engine consumes them ordered by timestamp and
/// never mutates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// When the observation was taken (stored in UTC)
    pub timestamp: DateTime<Utc>,
    /// Occupancy level observed at `timestamp`
    pub count: u32,
    /// Entry/exit tag; `None` for periodic polls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Sample {
    /// Create a periodic poll sample (no direction).
    pub fn poll(timestamp: DateTime<Utc>, count: u32) -> Self {
        Self {
            timestamp,
            count,
            direction: None,
        }
    }

    /// Create an entry-event sample.
    pub fn entry(timestamp: DateTime<Utc>, count: u32) -> Self {
        Self {
            timestamp,
            count,
            direction: Some(Direction::In),
        }
    }

    /// Create an exit-event sample.
    pub fn exit(timestamp: DateTime<Utc>, count: u32) -> Self {
        Self {
            timestamp,
            count,
            direction: Some(Direction::Out),
        }
    }

    /// Whether this sample carries a direction tag.
    pub fn is_directional(&self) -> bool {
        self.direction.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::In).unwrap(), "\"IN\"");
        assert_eq!(serde_json::to_string(&Direction::Out).unwrap(), "\"OUT\"");

        let parsed: Direction = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(parsed, Direction::Out);
    }

    #[test]
    fn test_poll_sample_omits_direction() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let sample = Sample::poll(ts, 7);
        assert!(!sample.is_directional());

        let json = serde_json::to_string(&sample).unwrap();
        assert!(!json.contains("direction"));
    }

    #[test]
    fn test_directional_sample_round_trip() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let sample = Sample::entry(ts, 3);

        let json = serde_json::to_string(&sample).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back.direction, Some(Direction::In));
        assert_eq!(back.count, 3);
        assert_eq!(back.direction.unwrap().count_change(), "+1");
    }
}
