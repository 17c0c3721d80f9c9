//! Refresh cycle for a host that polls a status feed.
//!
//! Holds the display state (loading flag, last summary, last error) and calls
//! the pure aggregator. Scheduling belongs to the host: call `refresh` from
//! whatever timer or loop drives it, one cycle at a time.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::aggregate;
use crate::config::Config;
use crate::error::FeedError;
use crate::types::{FeedRecord, UptimeSummary};

/// Anything that can produce the current list of feed records.
pub trait FeedSource {
  fn fetch(&mut self) -> Result<Vec<FeedRecord>, FeedError>;
}

impl<F> FeedSource for F
where
  F: FnMut() -> Result<Vec<FeedRecord>, FeedError>,
{
  fn fetch(&mut self) -> Result<Vec<FeedRecord>, FeedError> {
    self()
  }
}

pub struct Monitor<S> {
  config: Config,
  source: S,
  last_summary: Option<UptimeSummary>,
  last_error: Option<String>,
  loading: bool,
}

impl<S: FeedSource> Monitor<S> {
  pub fn new(config: Config, source: S) -> Self {
    Self {
      config,
      source,
      last_summary: None,
      last_error: None,
      loading: false,
    }
  }

  /// Run one refresh cycle at `now`.
  ///
  /// A fetch error keeps the previous summary and records the message; the next
  /// successful cycle replaces the summary and clears it.
  pub fn refresh(&mut self, now: DateTime<Utc>) -> Option<&UptimeSummary> {
    self.loading = true;
    match self.source.fetch() {
      Ok(records) => {
        let summary = aggregate::compute_uptime(&records, self.config.window_days, now);
        info!(
          records = records.len(),
          uptime_pct = summary.uptime_pct,
          incidents = summary.incident_count,
          "refreshed uptime summary"
        );
        self.last_summary = Some(summary);
        self.last_error = None;
      }
      Err(e) => {
        warn!(error = %e, "refresh failed, keeping previous summary");
        self.last_error = Some(e.to_string());
      }
    }
    self.loading = false;
    self.last_summary.as_ref()
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn last_summary(&self) -> Option<&UptimeSummary> {
    self.last_summary.as_ref()
  }

  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  /// Overall or any component uptime below the configured target.
  pub fn below_target(&self) -> bool {
    match (self.config.target_uptime, &self.last_summary) {
      (Some(target), Some(summary)) => {
        summary.uptime_pct < target || !summary.components_below(target).is_empty()
      }
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
  }

  fn outage(minutes: u32) -> FeedRecord {
    FeedRecord {
      title: "Outage".into(),
      timestamp: now() - Duration::hours(3),
      description: format!("Type: Incident\nDuration: {} minutes", minutes),
      kind: "incident".into(),
      components: vec!["API".into()],
    }
  }

  #[test]
  fn successful_refresh_stores_summary() {
    let mut monitor = Monitor::new(Config::default(), || Ok::<_, FeedError>(vec![outage(30)]));
    let summary = monitor.refresh(now()).unwrap();
    assert_eq!(summary.total_downtime.num_seconds(), 1800);
    assert_eq!(summary.window_days, 30);
    assert_eq!(monitor.config().window_days, 30);
    assert!(monitor.last_error().is_none());
    assert!(!monitor.is_loading());
  }

  #[test]
  fn failed_refresh_keeps_previous_summary() {
    let mut calls = 0;
    let source = move || {
      calls += 1;
      match calls {
        1 => Ok(vec![outage(30)]),
        2 => Err(FeedError::transport(502)),
        _ => Ok(vec![outage(60)]),
      }
    };
    let mut monitor = Monitor::new(Config::default().with_window_days(1), source);

    monitor.refresh(now());
    let kept = monitor.refresh(now()).unwrap();
    assert_eq!(kept.total_downtime.num_seconds(), 1800);
    assert_eq!(
      monitor.last_error(),
      Some("feed request failed with status 502")
    );

    let recovered = monitor.refresh(now()).unwrap();
    assert_eq!(recovered.total_downtime.num_seconds(), 3600);
    assert!(monitor.last_error().is_none());
  }

  #[test]
  fn first_refresh_failure_has_no_summary() {
    let mut monitor = Monitor::new(Config::default(), || {
      Err::<Vec<FeedRecord>, _>(FeedError::parse("unexpected end of document"))
    });
    assert!(monitor.refresh(now()).is_none());
    assert_eq!(
      monitor.last_error(),
      Some("feed parse: unexpected end of document")
    );
  }

  #[test]
  fn below_target_checks_components() {
    let config = Config::default().with_window_days(1).with_target_uptime(99.0);
    let mut monitor = Monitor::new(config, || Ok::<_, FeedError>(vec![outage(60)]));
    assert!(!monitor.below_target());
    monitor.refresh(now());
    // 60 minutes of 1440 is ~95.8% uptime.
    assert!(monitor.below_target());
  }
}
