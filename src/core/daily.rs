//! Daily summary computation.
//!
//! Aggregates today's samples into the headline dashboard figures: entry and
//! exit totals, the current count, the peak and when it happened, and the
//! day's average occupancy.

use crate::core::time::{clock_label, local_date};
use crate::store::types::{Direction, Sample};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Summary of today's occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Local calendar date the summary covers
    pub date: NaiveDate,
    /// Number of entry events
    pub total_in: u32,
    /// Number of exit events
    pub total_out: u32,
    /// Count of the most recent sample (0 if none)
    pub current_inside: u32,
    /// Highest count observed
    pub peak_count: u32,
    /// Local time of the first sample attaining the peak, e.g. "2:30 PM"
    pub peak_hour: Option<String>,
    /// Mean count, rounded half-up to the nearest integer
    pub avg_today: u32,
    /// Number of samples in range
    pub records_today: u32,
}

impl DailySummary {
    /// The all-zero summary for a day with no samples.
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_in: 0,
            total_out: 0,
            current_inside: 0,
            peak_count: 0,
            peak_hour: None,
            avg_today: 0,
            records_today: 0,
        }
    }
}

/// Compute the daily summary from today's samples.
///
/// `samples` is expected to cover the local day containing `now`; order does
/// not matter, the builder sorts internally. An empty slice yields the
/// all-zero summary, not an error.
pub fn daily_summary(samples: &[Sample], now: DateTime<Utc>, tz: Tz) -> DailySummary {
    let date = local_date(now, tz);
    if samples.is_empty() {
        return DailySummary::empty(date);
    }

    let mut ordered: Vec<&Sample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp);

    let total_in = ordered
        .iter()
        .filter(|s| s.direction == Some(Direction::In))
        .count() as u32;
    let total_out = ordered
        .iter()
        .filter(|s| s.direction == Some(Direction::Out))
        .count() as u32;

    // Chronologically last sample is the current occupancy.
    let current_inside = ordered.last().map(|s| s.count).unwrap_or(0);

    // Strict `>` keeps the earliest sample on ties.
    let mut peak: Option<&Sample> = None;
    for &sample in &ordered {
        if peak.map(|p| sample.count > p.count).unwrap_or(true) {
            peak = Some(sample);
        }
    }
    let peak_count = peak.map(|s| s.count).unwrap_or(0);
    let peak_hour = peak.map(|s| clock_label(s.timestamp, tz));

    let sum: u64 = ordered.iter().map(|s| s.count as u64).sum();
    let avg_today = (sum as f64 / ordered.len() as f64).round() as u32;

    DailySummary {
        date,
        total_in,
        total_out,
        current_inside,
        peak_count,
        peak_hour,
        avg_today,
        records_today: ordered.len() as u32,
    }
}
