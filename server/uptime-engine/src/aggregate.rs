//! Uptime aggregation: window clipping, global and per-component downtime, incident stats.
//!
//! Pure function of `(records, window_days, now)`. Records without a usable
//! duration are left out of every statistic; nothing here returns an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::extract;
use crate::merge;
use crate::types::*;

/// Compute availability over the `window_days` days ending at `now`.
///
/// Days are a fixed 86400 seconds. A window with no positive length reports 100% uptime.
pub fn compute_uptime(records: &[FeedRecord], window_days: i64, now: DateTime<Utc>) -> UptimeSummary {
  let window_end = now;
  let window_start = window_start(now, window_days);

  let mut intervals: Vec<TimeInterval> = Vec::new();
  let mut by_component: BTreeMap<String, Vec<TimeInterval>> = BTreeMap::new();
  let mut incident_total = Duration::zero();
  let mut incident_count: u64 = 0;

  for record in records {
    let duration = match extract::extract_duration(&record.description) {
      Some(d) => d,
      None => {
        debug!(title = %record.title, "no duration, skipping");
        continue;
      }
    };

    let start = record.timestamp;
    let end = start
      .checked_add_signed(duration)
      .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let candidate = match TimeInterval::new(start, end) {
      Some(iv) => iv,
      None => continue,
    };

    // Incident resolution uses the full duration, as long as the incident started in the window.
    if record.is_incident() && window_start <= start && start <= window_end {
      incident_total = incident_total.checked_add(&duration).unwrap_or(Duration::MAX);
      incident_count += 1;
    }

    let clipped = match candidate.clip(window_start, window_end) {
      Some(iv) => iv,
      None => {
        debug!(title = %record.title, %start, "outside window, skipping");
        continue;
      }
    };

    intervals.push(clipped);
    for name in &record.components {
      by_component.entry(name.clone()).or_default().push(clipped);
    }
  }

  let window = window_end - window_start;
  let merged_intervals = merge::merge(&intervals);
  let total_downtime = merge::total_duration(&merged_intervals);

  let components = by_component
    .into_iter()
    .map(|(name, list)| {
      let merged = merge::merge(&list);
      let downtime = merge::total_duration(&merged);
      let stats = ComponentStats {
        uptime_pct: uptime_pct(downtime, window),
        downtime,
        intervals: merged,
      };
      (name, stats)
    })
    .collect();

  UptimeSummary {
    window_days,
    window_start,
    window_end,
    uptime_pct: uptime_pct(total_downtime, window),
    total_downtime,
    merged_intervals,
    incident_count,
    avg_incident_resolution: average(incident_total, incident_count),
    components,
  }
}

/// `now - days`, saturating at the representable range.
fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  let saturated = if days >= 0 {
    DateTime::<Utc>::MIN_UTC
  } else {
    DateTime::<Utc>::MAX_UTC
  };
  Duration::try_days(days)
    .and_then(|span| now.checked_sub_signed(span))
    .unwrap_or(saturated)
}

/// Percentage of `window` not covered by `downtime`, clamped to [0, 100].
fn uptime_pct(downtime: Duration, window: Duration) -> f64 {
  let window_secs = duration_secs(window);
  if window_secs <= 0.0 {
    return 100.0;
  }
  ((1.0 - duration_secs(downtime) / window_secs) * 100.0).clamp(0.0, 100.0)
}

fn average(total: Duration, count: u64) -> Option<Duration> {
  if count == 0 {
    return None;
  }
  Some(total / i32::try_from(count).unwrap_or(i32::MAX))
}
