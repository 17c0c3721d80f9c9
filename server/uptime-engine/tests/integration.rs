//! Integration tests for the uptime engine.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uptime_engine::types::Report;
use uptime_engine::{compute_uptime, ingest, Config, FeedError, Monitor, RawFeedItem};

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap()
}

fn fixture_items() -> Vec<RawFeedItem> {
  let json = r#"[
    {
      "title": "API errors",
      "pub_date": "Wed, 15 Jan 2025 01:00:00 +0000",
      "description": "We saw elevated error rates.\nType: Incident\nAffected Components: API\nDuration: 1 hour",
      "link": "https://status.example.com/incidents/1"
    },
    {
      "title": "Database upgrade",
      "pub_date": "Wed, 15 Jan 2025 01:30:00 +0000",
      "description": "Type: Maintenance\nAffected Components: API, Web\nDuration: 30 minutes"
    },
    {
      "title": "Announcement",
      "pub_date": "Wed, 15 Jan 2025 05:00:00 +0000",
      "description": "New status page design."
    },
    {
      "title": "Broken date",
      "pub_date": "sometime",
      "description": "Type: Incident\nDuration: 5 hours"
    }
  ]"#;
  serde_json::from_str(json).unwrap()
}

#[test]
fn feed_items_to_summary() {
  let records = ingest::normalize_all(&fixture_items());
  assert_eq!(records.len(), 3, "undated item should be dropped");

  let summary = compute_uptime(&records, 1, now());

  assert_eq!(summary.merged_intervals.len(), 1);
  assert_eq!(summary.total_downtime.num_seconds(), 3600);
  assert!((summary.uptime_pct - 95.833_333_333).abs() < 1e-6);
  assert_eq!(summary.incident_count, 1);
  assert_eq!(summary.avg_incident_resolution, Some(Duration::hours(1)));

  let names: Vec<&str> = summary.components.keys().map(String::as_str).collect();
  assert_eq!(names, vec!["API", "Web"]);
  assert_eq!(summary.components["API"].downtime.num_seconds(), 3600);
  assert_eq!(summary.components["Web"].downtime.num_seconds(), 1800);
  assert!((summary.components["Web"].uptime_pct - (1.0 - 1800.0 / 86400.0) * 100.0).abs() < 1e-9);
}

#[test]
fn summary_json_contract() {
  let records = ingest::normalize_all(&fixture_items());
  let summary = compute_uptime(&records, 1, now());
  let value = serde_json::to_value(&summary).unwrap();

  assert_eq!(value["window_days"], 1);
  assert_eq!(value["window_end"], "2025-01-16T00:00:00Z");
  assert_eq!(value["window_start"], "2025-01-15T00:00:00Z");
  assert_eq!(value["total_downtime_secs"], 3600.0);
  assert_eq!(value["avg_incident_resolution_secs"], 3600.0);
  assert_eq!(value["incident_count"], 1);
  assert_eq!(value["merged_intervals"][0]["start"], "2025-01-15T01:00:00Z");
  assert_eq!(value["merged_intervals"][0]["end"], "2025-01-15T02:00:00Z");
  assert_eq!(value["components"]["Web"]["downtime_secs"], 1800.0);
}

#[test]
fn no_incidents_omits_average() {
  let summary = compute_uptime(&[], 30, now());
  let value = serde_json::to_value(&summary).unwrap();
  assert!(value.get("avg_incident_resolution_secs").is_none());
  assert_eq!(value["uptime_pct"], 100.0);
  assert_eq!(value["incident_count"], 0);
}

#[test]
fn report_flags_components_below_target() {
  let records = ingest::normalize_all(&fixture_items());
  let summary = compute_uptime(&records, 1, now());

  let report = Report::new(&summary, Some(97.0));
  assert_eq!(report.below_target, Some(true));
  assert_eq!(report.components_below_target, vec!["API"]);

  let value = serde_json::to_value(&report).unwrap();
  assert_eq!(value["target_uptime"], 97.0);
  assert_eq!(value["components_below_target"][0], "API");
  assert_eq!(value["incident_count"], 1);

  let untargeted = serde_json::to_value(Report::new(&summary, None)).unwrap();
  assert!(untargeted.get("below_target").is_none());
  assert!(untargeted.get("components_below_target").is_none());
}

#[test]
fn deterministic_output_across_runs() {
  let records = ingest::normalize_all(&fixture_items());
  let json1 = serde_json::to_string(&compute_uptime(&records, 1, now())).unwrap();
  let json2 = serde_json::to_string(&compute_uptime(&records, 1, now())).unwrap();
  assert_eq!(json1, json2, "Same inputs must produce identical JSON output");
}

#[test]
fn monitor_recovers_after_fetch_error() {
  let mut responses = vec![
    Ok(ingest::normalize_all(&fixture_items())),
    Err(FeedError::invalid_address("status.example.com/history.rss")),
  ]
  .into_iter();
  let source = move || responses.next().unwrap_or_else(|| Ok(Vec::new()));
  let mut monitor = Monitor::new(Config::default().with_window_days(1), source);

  assert_eq!(monitor.refresh(now()).unwrap().incident_count, 1);
  assert_eq!(monitor.refresh(now()).unwrap().incident_count, 1);
  assert!(monitor.last_error().unwrap().contains("invalid feed address"));

  assert_eq!(monitor.refresh(now()).unwrap().uptime_pct, 100.0);
  assert!(monitor.last_error().is_none());
}
