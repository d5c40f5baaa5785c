//! Recent activity log computation.
//!
//! Projects the most recent directional samples into human-readable entry and
//! exit rows. Periodic polls carry no direction and have no natural +/- delta,
//! so they are excluded entirely.

use crate::core::error::EngineError;
use crate::core::time::clock_label;
use crate::store::types::{Direction, Sample};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Default number of rows in the activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

/// Kind of a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Entry,
    Exit,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Entry => "entry",
            ActivityKind::Exit => "exit",
        }
    }
}

/// One row of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// "entry" or "exit"
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Local 12-hour clock time, e.g. "10:05 AM"
    pub time: String,
    /// "+1" for entries, "-1" for exits
    pub count_change: String,
    /// Occupancy after the event
    pub current_count: u32,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
}

/// Resolve a caller-supplied row limit.
///
/// `None` falls back to [`DEFAULT_ACTIVITY_LIMIT`]; negative values are
/// rejected before any aggregation runs.
pub fn resolve_limit(requested: Option<i64>) -> Result<usize, EngineError> {
    match requested {
        None => Ok(DEFAULT_ACTIVITY_LIMIT),
        Some(n) if n < 0 => Err(EngineError::InvalidLimit(n)),
        Some(n) => Ok(n as usize),
    }
}

/// Build the recent activity feed.
///
/// Keeps only directional samples, newest first, at most `limit` rows. Empty
/// input (or a slice of nothing but polls) yields an empty vec.
pub fn recent_activity(samples: &[Sample], limit: usize, tz: Tz) -> Vec<ActivityEntry> {
    let mut directional: Vec<&Sample> = samples.iter().filter(|s| s.is_directional()).collect();
    directional.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    directional
        .into_iter()
        .take(limit)
        .filter_map(|sample| {
            let direction = sample.direction?;
            Some(ActivityEntry {
                kind: match direction {
                    Direction::In => ActivityKind::Entry,
                    Direction::Out => ActivityKind::Exit,
                },
                time: clock_label(sample.timestamp, tz),
                count_change: direction.count_change().to_string(),
                current_count: sample.count,
                timestamp: sample.timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 6, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_recent_activity_scenario() {
        let samples = vec![
            Sample::entry(ts(10, 0), 5),
            Sample::exit(ts(10, 5), 4),
            Sample::entry(ts(10, 10), 6),
        ];
        let feed = recent_activity(&samples, 2, UTC);

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].kind, ActivityKind::Entry);
        assert_eq!(feed[0].count_change, "+1");
        assert_eq!(feed[0].current_count, 6);
        assert_eq!(feed[1].kind, ActivityKind::Exit);
        assert_eq!(feed[1].count_change, "-1");
        assert_eq!(feed[1].current_count, 4);
    }

    #[test]
    fn test_polls_are_excluded() {
        let samples = vec![
            Sample::poll(ts(9, 0), 5),
            Sample::entry(ts(9, 30), 6),
            Sample::poll(ts(10, 0), 6),
        ];
        let feed = recent_activity(&samples, 10, UTC);

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, ActivityKind::Entry);
    }

    #[test]
    fn test_empty_input() {
        assert!(recent_activity(&[], 10, UTC).is_empty());

        let polls_only = vec![Sample::poll(ts(9, 0), 2)];
        assert!(recent_activity(&polls_only, 10, UTC).is_empty());
    }

    #[test]
    fn test_output_is_newest_first_and_capped() {
        let samples: Vec<Sample> = (0..5).map(|i| Sample::entry(ts(9, i), i)).collect();
        let feed = recent_activity(&samples, 3, UTC);

        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].time, "9:04 AM");
        assert_eq!(feed[2].time, "9:02 AM");
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None).unwrap(), DEFAULT_ACTIVITY_LIMIT);
        assert_eq!(resolve_limit(Some(25)).unwrap(), 25);
        assert_eq!(resolve_limit(Some(0)).unwrap(), 0);
        assert!(matches!(
            resolve_limit(Some(-1)),
            Err(EngineError::InvalidLimit(-1))
        ));
    }

    #[test]
    fn test_row_serialization_shape() {
        let samples = vec![Sample::exit(ts(10, 5), 4)];
        let feed = recent_activity(&samples, 1, UTC);

        let json = serde_json::to_value(&feed[0]).unwrap();
        assert_eq!(json["type"], "exit");
        assert_eq!(json["count_change"], "-1");
        assert_eq!(json["current_count"], 4);
        assert_eq!(json["time"], "10:05 AM");
    }
}
