//! Status feed uptime engine — deterministic availability statistics.
//!
//! Takes status-page entries (incidents, maintenance windows), reads the
//! `Type:`, `Affected Components:` and `Duration:` fields out of their
//! descriptions, and computes overall and per-component uptime over a
//! trailing window, with merged downtime intervals and incident stats.
//!
//! No network, no DB; `aggregate::compute_uptime` is a pure function.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod merge;
pub mod monitor;
pub mod types;

pub use aggregate::compute_uptime;
pub use config::Config;
pub use error::FeedError;
pub use monitor::{FeedSource, Monitor};
pub use types::{ComponentStats, FeedRecord, RawFeedItem, TimeInterval, UptimeSummary};
