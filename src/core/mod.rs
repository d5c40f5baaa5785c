//! Core aggregation engine.
//!
//! This module contains:
//! - Time bucketing in the configurable reference timezone
//! - The four pure view builders (daily, trend, weekly, activity)
//! - Malformed-argument errors
//!
//! Every builder is a pure function over an immutable sample slice plus an
//! injected "now"; there is no shared state and no I/O, so concurrent
//! invocations are fully independent.

pub mod activity;
pub mod daily;
pub mod error;
pub mod time;
pub mod trend;
pub mod weekly;

// Re-export commonly used types
pub use activity::{
    recent_activity, resolve_limit, ActivityEntry, ActivityKind, DEFAULT_ACTIVITY_LIMIT,
};
pub use daily::{daily_summary, DailySummary};
pub use error::EngineError;
pub use time::{day_start, week_start, TimeRange};
pub use trend::{hourly_trend, TrendPoint};
pub use weekly::{weekly_summary, DaySummary, WeeklySummary};
