//! Dashboard report builder.
//!
//! Assembles the four computed views into a single versioned JSON envelope
//! with producer metadata, the shape consumed by dashboards and exports. The
//! builder queries a [`SampleStore`] snapshot at an injected "now"; it keeps
//! no state between builds beyond its instance identity.

use crate::core::{
    daily_summary, hourly_trend, recent_activity, week_start, weekly_summary, ActivityEntry,
    DailySummary, TimeRange, TrendPoint, WeeklySummary, DEFAULT_ACTIVITY_LIMIT,
};
use crate::store::SampleStore;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The current report format version.
pub const REPORT_VERSION: &str = "1.0";

/// The name of this producer.
pub const PRODUCER_NAME: &str = "occusense";

/// Producer metadata stamped onto every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
    /// Unique instance identifier (UUID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    /// Hostname of the machine that produced the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// One complete dashboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Report schema version
    pub report_version: String,
    /// When this report was computed (RFC3339)
    pub generated_at_utc: String,
    /// Producer metadata
    pub producer: ReportProducer,
    /// IANA name of the reference timezone the views were bucketed in
    pub timezone: String,
    /// Today's headline figures
    pub today: DailySummary,
    /// Today's hourly trend
    pub hourly_trend: Vec<TrendPoint>,
    /// Current week, day by day
    pub week: WeeklySummary,
    /// Latest entry/exit events
    pub recent_activity: Vec<ActivityEntry>,
}

/// Builder for dashboard reports.
pub struct ReportBuilder {
    instance_id: Uuid,
    tz: Tz,
    activity_limit: usize,
}

impl ReportBuilder {
    /// Create a new report builder with a unique instance ID.
    pub fn new(tz: Tz) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            tz,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    /// Set the number of recent activity rows included in reports.
    pub fn with_activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit;
        self
    }

    /// Get the instance ID.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Build a report from a store snapshot at the given instant.
    pub fn build(&self, store: &dyn SampleStore, now: DateTime<Utc>) -> DashboardReport {
        let today_samples = store.fetch_range(&TimeRange::today(now, self.tz));
        let week_begin = week_start(now, self.tz);
        let week_samples = store.fetch_range(&TimeRange::week(week_begin, self.tz));
        let recent = store.fetch_recent(self.activity_limit, true);

        DashboardReport {
            report_version: REPORT_VERSION.to_string(),
            generated_at_utc: now.to_rfc3339(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                instance_id: Some(self.instance_id.to_string()),
                device_id: device_id(),
            },
            timezone: self.tz.name().to_string(),
            today: daily_summary(&today_samples, now, self.tz),
            hourly_trend: hourly_trend(&today_samples, self.tz),
            week: weekly_summary(&week_samples, week_begin, self.tz),
            recent_activity: recent_activity(&recent, self.activity_limit, self.tz),
        }
    }

    /// Build and serialize a report to pretty JSON.
    pub fn build_json(&self, store: &dyn SampleStore, now: DateTime<Utc>) -> String {
        let report = self.build(store, now);
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Hostname of this machine, if it can be read.
fn device_id() -> Option<String> {
    hostname::get().ok().map(|h| h.to_string_lossy().into_owned())
}
