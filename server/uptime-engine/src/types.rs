//! Core types for the uptime engine (JSON contracts + computed summaries).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One feed item as produced by the feed fetcher/parser. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeedItem {
  #[serde(default)]
  pub title: String,
  /// Publication date, RFC 2822 (RSS `pubDate`) or RFC 3339. Missing means undated.
  #[serde(default)]
  pub pub_date: String,
  #[serde(default)]
  pub description: String,
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// One status entry after ingestion. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRecord {
  pub title: String,
  pub timestamp: DateTime<Utc>,
  pub description: String,
  /// Lower-cased category tag ("incident", "maintenance", ...); empty when absent.
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default)]
  pub components: Vec<String>,
}

impl FeedRecord {
  pub fn is_incident(&self) -> bool {
    self.kind.eq_ignore_ascii_case("incident")
  }
}

/// A non-empty span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
  start: DateTime<Utc>,
  end: DateTime<Utc>,
}

impl TimeInterval {
  /// Returns `None` for zero or negative spans.
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
    (end > start).then_some(Self { start, end })
  }

  pub fn start(&self) -> DateTime<Utc> {
    self.start
  }

  pub fn end(&self) -> DateTime<Utc> {
    self.end
  }

  pub fn duration(&self) -> Duration {
    self.end - self.start
  }

  /// Push the end out to `end` if it is later.
  pub(crate) fn extend_to(&mut self, end: DateTime<Utc>) {
    self.end = self.end.max(end);
  }

  /// Intersection with `[lo, hi)`, if any.
  pub fn clip(&self, lo: DateTime<Utc>, hi: DateTime<Utc>) -> Option<Self> {
    Self::new(self.start.max(lo), self.end.min(hi))
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentStats {
  pub uptime_pct: f64,
  #[serde(rename = "downtime_secs", serialize_with = "secs::serialize")]
  pub downtime: Duration,
  pub intervals: Vec<TimeInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UptimeSummary {
  pub window_days: i64,
  pub window_start: DateTime<Utc>,
  pub window_end: DateTime<Utc>,
  pub uptime_pct: f64,
  #[serde(rename = "total_downtime_secs", serialize_with = "secs::serialize")]
  pub total_downtime: Duration,
  pub merged_intervals: Vec<TimeInterval>,
  pub incident_count: u64,
  #[serde(
    rename = "avg_incident_resolution_secs",
    serialize_with = "secs::serialize_opt",
    skip_serializing_if = "Option::is_none"
  )]
  pub avg_incident_resolution: Option<Duration>,
  pub components: BTreeMap<String, ComponentStats>,
}

impl UptimeSummary {
  /// Component names whose uptime is strictly below `target` percent, in name order.
  pub fn components_below(&self, target: f64) -> Vec<&str> {
    self
      .components
      .iter()
      .filter(|(_, stats)| stats.uptime_pct < target)
      .map(|(name, _)| name.as_str())
      .collect()
  }
}

/// Fractional seconds for a `Duration`.
pub fn duration_secs(d: Duration) -> f64 {
  d.num_seconds() as f64 + f64::from(d.subsec_nanos()) / 1e9
}

mod secs {
  use chrono::Duration;
  use serde::Serializer;

  pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(super::duration_secs(*d))
  }

  pub fn serialize_opt<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match d {
      Some(d) => s.serialize_f64(super::duration_secs(*d)),
      None => s.serialize_none(),
    }
  }
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Final report written by the binary: the summary plus target evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
  #[serde(flatten)]
  pub summary: &'a UptimeSummary,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_uptime: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub below_target: Option<bool>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub components_below_target: Vec<&'a str>,
}

impl<'a> Report<'a> {
  pub fn new(summary: &'a UptimeSummary, target_uptime: Option<f64>) -> Self {
    Self {
      summary,
      target_uptime,
      below_target: target_uptime.map(|t| summary.uptime_pct < t),
      components_below_target: target_uptime
        .map(|t| summary.components_below(t))
        .unwrap_or_default(),
    }
  }
}

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub line: Option<usize>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      line: None,
    }
  }

  pub fn with_line(mut self, line: usize) -> Self {
    self.line = Some(line);
    self
  }
}
