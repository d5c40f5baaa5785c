//! Time bucketing in the reference timezone.
//!
//! Samples are stored in UTC; one configurable IANA timezone governs day
//! boundaries, week starts, hour-of-day buckets, and display formatting.
//! Everything the builders need to reason about wall-clock time lives here.

use crate::core::error::EngineError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A half-open time range `[start, end)` used to select samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The local calendar day containing `now`, as a UTC range.
    pub fn today(now: DateTime<Utc>, tz: Tz) -> Self {
        let date = now.with_timezone(&tz).date_naive();
        Self {
            start: day_start(date, tz),
            end: day_start(date + Duration::days(1), tz),
        }
    }

    /// The 7-day window beginning at local midnight of `week_start`.
    pub fn week(week_start: NaiveDate, tz: Tz) -> Self {
        Self {
            start: day_start(week_start, tz),
            end: day_start(week_start + Duration::days(7), tz),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Check if an instant falls within this range.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

/// Local midnight of `date` as a UTC instant.
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Zones that spring forward at 00:00 have no local midnight that day.
        None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
    }
}

/// The most recent week start (Sunday) on or before `now`, as a local date.
pub fn week_start(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let today = now.with_timezone(&tz).date_naive();
    today - Duration::days(today.weekday().num_days_from_sunday() as i64)
}

/// Hour-of-day of a UTC instant in the reference timezone (0-23).
pub fn local_hour(timestamp: DateTime<Utc>, tz: Tz) -> u32 {
    use chrono::Timelike;
    timestamp.with_timezone(&tz).hour()
}

/// Local calendar date of a UTC instant in the reference timezone.
pub fn local_date(timestamp: DateTime<Utc>, tz: Tz) -> NaiveDate {
    timestamp.with_timezone(&tz).date_naive()
}

/// Zero-padded hour slot label, e.g. `"08:00"`.
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// 12-hour slot label with AM/PM and minute fixed to `:00`, e.g. `"2:00 PM"`.
pub fn hour_label_12(hour: u32) -> String {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}:00 {meridiem}")
}

/// 12-hour clock time of a UTC instant in the reference timezone,
/// e.g. `"9:05 AM"`.
pub fn clock_label(timestamp: DateTime<Utc>, tz: Tz) -> String {
    timestamp.with_timezone(&tz).format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        assert!(matches!(
            TimeRange::new(start, end),
            Err(EngineError::InvalidRange { .. })
        ));
        assert!(matches!(
            TimeRange::new(start, start),
            Err(EngineError::InvalidRange { .. })
        ));
        assert!(TimeRange::new(end, start).is_ok());
    }

    #[test]
    fn test_range_is_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let range = TimeRange::new(start, end).unwrap();

        assert!(range.contains(start));
        assert!(range.contains(end - Duration::seconds(1)));
        assert!(!range.contains(end));
    }

    #[test]
    fn test_today_range_in_offset_zone() {
        // 02:00 UTC on Aug 6 is 22:00 on Aug 5 in New York (UTC-4).
        let now = Utc.with_ymd_and_hms(2024, 8, 6, 2, 0, 0).unwrap();
        let range = TimeRange::today(now, New_York);

        let expected_start = Utc.with_ymd_and_hms(2024, 8, 5, 4, 0, 0).unwrap();
        assert_eq!(range.start(), expected_start);
        assert_eq!(range.end() - range.start(), Duration::days(1));
        assert!(range.contains(now));
    }

    #[test]
    fn test_week_start_is_most_recent_sunday() {
        // 2024-08-07 is a Wednesday; the week began Sunday 2024-08-04.
        let now = Utc.with_ymd_and_hms(2024, 8, 7, 12, 0, 0).unwrap();
        assert_eq!(
            week_start(now, UTC),
            NaiveDate::from_ymd_opt(2024, 8, 4).unwrap()
        );

        // A Sunday is its own week start.
        let sunday = Utc.with_ymd_and_hms(2024, 8, 4, 12, 0, 0).unwrap();
        assert_eq!(
            week_start(sunday, UTC),
            NaiveDate::from_ymd_opt(2024, 8, 4).unwrap()
        );
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(8), "08:00");
        assert_eq!(hour_label(23), "23:00");

        assert_eq!(hour_label_12(0), "12:00 AM");
        assert_eq!(hour_label_12(9), "9:00 AM");
        assert_eq!(hour_label_12(12), "12:00 PM");
        assert_eq!(hour_label_12(14), "2:00 PM");
    }

    #[test]
    fn test_clock_label() {
        let ts = Utc.with_ymd_and_hms(2024, 8, 6, 9, 5, 0).unwrap();
        assert_eq!(clock_label(ts, UTC), "9:05 AM");

        let ts = Utc.with_ymd_and_hms(2024, 8, 6, 18, 30, 0).unwrap();
        assert_eq!(clock_label(ts, New_York), "2:30 PM");
    }
}
