//! Occusense - Occupancy analytics for people-counter deployments.
//!
//! This library turns an ordered stream of occupancy samples (periodic polls
//! and entry/exit events from a monitored space) into the summary views a
//! dashboard renders: today's figures, the hourly trend, a week of busiest
//! and freest hours, and a recent activity feed.
//!
//! # Design
//!
//! The aggregation core is stateless: every builder is a pure function over
//! an immutable sample slice plus an injected "now" and reference timezone.
//! Nothing in the core performs I/O, retains references, or needs locking;
//! two dashboard refreshes in flight compute independently. Time is handled
//! with one explicit convention: samples are stored in UTC, and a single
//! configurable IANA timezone governs day boundaries, week starts, hour
//! buckets, and display formatting.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Occusense                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │   Store    │──▶│ Core builders│──▶│  DashboardReport  │  │
//! │  │ (ordered)  │   │ (pure fns)   │   │  (JSON envelope)  │  │
//! │  └────────────┘   └──────────────┘   └───────────────────┘  │
//! │        ▲                                                     │
//! │        │ POST /api/occupancy/update   (feature "server")     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use occusense::core::daily_summary;
//! use occusense::store::Sample;
//!
//! let samples = vec![
//!     Sample::entry(Utc.with_ymd_and_hms(2024, 8, 6, 8, 0, 0).unwrap(), 5),
//!     Sample::entry(Utc.with_ymd_and_hms(2024, 8, 6, 9, 0, 0).unwrap(), 6),
//! ];
//! let now = Utc.with_ymd_and_hms(2024, 8, 6, 10, 0, 0).unwrap();
//!
//! let summary = daily_summary(&samples, now, chrono_tz::UTC);
//! assert_eq!(summary.current_inside, 6);
//! assert_eq!(summary.peak_count, 6);
//! ```

pub mod config;
pub mod core;
pub mod report;
pub mod store;

#[cfg(feature = "server")]
pub mod server;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use core::{
    daily_summary, hourly_trend, recent_activity, weekly_summary, ActivityEntry, DailySummary,
    DaySummary, EngineError, TimeRange, TrendPoint, WeeklySummary,
};
pub use report::{DashboardReport, ReportBuilder};
pub use store::{Direction, MemoryStore, Sample, SampleStore, StoreError};

// Server re-exports (when enabled)
#[cfg(feature = "server")]
pub use server::{ServerConfig, ServerState};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
