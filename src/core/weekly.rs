//! Weekly summary computation.
//!
//! Partitions a 7-day window into per-day groups, then reduces each day to
//! its busiest and freest hours (by mean count per hour bucket), directional
//! totals, and peak occupancy. Days with no samples are still listed so the
//! dashboard can render closed or no-data days.

use crate::core::time::{hour_label_12, local_date, local_hour};
use crate::store::types::{Direction, Sample};
use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of the weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Local calendar date
    pub date: NaiveDate,
    /// Full weekday name ("Monday")
    pub day: String,
    /// Hour with the highest mean count, 12-hour label; `None` for empty days
    pub busiest_hour: Option<String>,
    /// Hour with the lowest mean count, 12-hour label; `None` for empty days
    pub freest_hour: Option<String>,
    /// Number of entry events
    pub total_in: u32,
    /// Number of exit events
    pub total_out: u32,
    /// Highest count observed that day (0 for empty days)
    pub peak_count: u32,
}

/// Summary of a 7-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// First day of the window
    pub week_start: NaiveDate,
    /// Last day of the window (`week_start + 6`)
    pub week_end: NaiveDate,
    /// One entry per calendar date, ascending; always 7 entries
    pub days: Vec<DaySummary>,
}

/// Hour buckets in order of first chronological appearance.
///
/// Busiest/freest selection scans with strict comparisons, so when two hours
/// share the same mean the earliest-inserted bucket wins. That is the
/// documented tie-break rule; callers must not rely on ascending hour order.
struct HourBuckets {
    buckets: Vec<(u32, Vec<u32>)>,
}

impl HourBuckets {
    fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    fn push(&mut self, hour: u32, count: u32) {
        match self.buckets.iter_mut().find(|(h, _)| *h == hour) {
            Some((_, counts)) => counts.push(count),
            None => self.buckets.push((hour, vec![count])),
        }
    }

    fn means(&self) -> Vec<(u32, f64)> {
        self.buckets
            .iter()
            .map(|(hour, counts)| {
                let sum: u64 = counts.iter().map(|&c| c as u64).sum();
                (*hour, sum as f64 / counts.len() as f64)
            })
            .collect()
    }

    /// Hour with the maximum mean count; first inserted wins ties.
    fn busiest(&self) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;
        for (hour, mean) in self.means() {
            if best.map(|(_, m)| mean > m).unwrap_or(true) {
                best = Some((hour, mean));
            }
        }
        best.map(|(hour, _)| hour)
    }

    /// Hour with the minimum mean count; first inserted wins ties.
    fn freest(&self) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;
        for (hour, mean) in self.means() {
            if best.map(|(_, m)| mean < m).unwrap_or(true) {
                best = Some((hour, mean));
            }
        }
        best.map(|(hour, _)| hour)
    }
}

/// Compute the weekly summary for the window `[week_start, week_start + 7d)`.
///
/// `samples` is expected to cover that window; order does not matter, the
/// builder sorts internally. All 7 dates appear in the output exactly once,
/// including dates with no samples.
pub fn weekly_summary(samples: &[Sample], week_start: NaiveDate, tz: Tz) -> WeeklySummary {
    let mut ordered: Vec<&Sample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp);

    let mut by_date: BTreeMap<NaiveDate, Vec<&Sample>> = BTreeMap::new();
    for sample in ordered {
        by_date
            .entry(local_date(sample.timestamp, tz))
            .or_default()
            .push(sample);
    }

    let days = (0..7)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            summarize_day(date, by_date.get(&date).map(Vec::as_slice), tz)
        })
        .collect();

    WeeklySummary {
        week_start,
        week_end: week_start + Duration::days(6),
        days,
    }
}

/// Reduce one day's chronologically ordered samples to a `DaySummary`.
fn summarize_day(date: NaiveDate, samples: Option<&[&Sample]>, tz: Tz) -> DaySummary {
    let day = date.format("%A").to_string();

    let samples = match samples {
        Some(samples) if !samples.is_empty() => samples,
        // A closed or no-data day is listed, never dropped.
        _ => {
            return DaySummary {
                date,
                day,
                busiest_hour: None,
                freest_hour: None,
                total_in: 0,
                total_out: 0,
                peak_count: 0,
            }
        }
    };

    let mut buckets = HourBuckets::new();
    for sample in samples {
        buckets.push(local_hour(sample.timestamp, tz), sample.count);
    }

    DaySummary {
        date,
        day,
        busiest_hour: buckets.busiest().map(hour_label_12),
        freest_hour: buckets.freest().map(hour_label_12),
        total_in: samples
            .iter()
            .filter(|s| s.direction == Some(Direction::In))
            .count() as u32,
        total_out: samples
            .iter()
            .filter(|s| s.direction == Some(Direction::Out))
            .count() as u32,
        peak_count: samples.iter().map(|s| s.count).max().unwrap_or(0),
    }
}
