//! Binary entrypoint: read feed items as JSON lines from stdin, write one uptime report to stdout.
//!
//! Each input line is a RawFeedItem (`title`, `pub_date`, `description`).
//! Lines that are not valid JSON produce an ErrorOutput line and are skipped.
//! After EOF a single Report (UptimeSummary + target evaluation) is written.
//! Logs go to stderr.

use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{debug, error};

use uptime_engine::config::{Config, DEFAULT_WINDOW_DAYS};
use uptime_engine::types::{ErrorOutput, Report};
use uptime_engine::{compute_uptime, ingest, RawFeedItem};

#[derive(Parser)]
#[command(name = "uptime-engine")]
#[command(version, about = "Compute uptime over a trailing window from status feed items on stdin")]
struct Cli {
  /// Number of days to look back from now
  #[arg(short, long, env = "UPTIME_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS, allow_negative_numbers = true)]
  days: i64,

  /// Required uptime percentage; overall and component results below it are flagged
  #[arg(short, long, env = "UPTIME_TARGET")]
  target_uptime: Option<f64>,

  /// Evaluation time (RFC 3339); defaults to the current time
  #[arg(long)]
  now: Option<DateTime<Utc>>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let mut config = Config::default().with_window_days(cli.days);
  if let Some(target) = cli.target_uptime {
    config = config.with_target_uptime(target);
  }

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let mut items: Vec<RawFeedItem> = Vec::new();

  for (idx, line) in stdin.lock().lines().enumerate() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        error!("read error: {}", e);
        std::process::exit(1);
      }
    };

    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    match serde_json::from_str::<RawFeedItem>(trimmed) {
      Ok(item) => items.push(item),
      Err(e) => {
        let err = ErrorOutput::new(format!("json parse: {}", e)).with_line(idx + 1);
        let _ = serde_json::to_writer(&mut out, &err);
        let _ = writeln!(out);
      }
    }
  }

  let records = ingest::normalize_all(&items);
  debug!(items = items.len(), records = records.len(), "ingested feed");

  let now = cli.now.unwrap_or_else(Utc::now);
  let summary = compute_uptime(&records, config.window_days, now);
  let report = Report::new(&summary, config.target_uptime);

  let _ = serde_json::to_writer(&mut out, &report);
  let _ = writeln!(out);
  let _ = out.flush();
}

fn init_logging(verbose: bool) {
  use tracing_subscriber::EnvFilter;

  let filter = if verbose {
    EnvFilter::new("uptime_engine=debug")
  } else {
    EnvFilter::new("uptime_engine=info")
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .without_time()
    .init();
}
