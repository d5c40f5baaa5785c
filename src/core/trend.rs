//! Hourly trend computation.
//!
//! Buckets today's samples into hour-of-day slots, keeping the latest sample
//! per hour. Missing hours are not interpolated; the dashboard plots only the
//! hours that have data.

use crate::core::time::{hour_label, local_hour};
use crate::store::types::Sample;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One plotted point of the hourly trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Hour slot label, zero-padded ("08:00")
    pub time: String,
    /// Count of the chronologically last sample in that hour
    pub count: u32,
}

/// Compute the hourly trend for one day of samples.
///
/// For each hour-of-day present in the data, the chronologically last sample
/// wins. Points are emitted sorted by label ascending; for zero-padded
/// two-digit hours that equals chronological order. Empty input yields an
/// empty vec.
pub fn hourly_trend(samples: &[Sample], tz: Tz) -> Vec<TrendPoint> {
    let mut ordered: Vec<&Sample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp);

    let mut by_hour: BTreeMap<u32, u32> = BTreeMap::new();
    for sample in ordered {
        by_hour.insert(local_hour(sample.timestamp, tz), sample.count);
    }

    by_hour
        .into_iter()
        .map(|(hour, count)| TrendPoint {
            time: hour_label(hour),
            count,
        })
        .collect()
}
