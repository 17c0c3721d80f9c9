//! Normalize raw feed items into `FeedRecord`s.
//!
//! Field extraction runs here, once per item, so the aggregator sees `type`
//! and `components` already populated.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::extract;
use crate::types::{FeedRecord, RawFeedItem};

/// Parse one raw item. Returns `None` when the publication date is missing or unparseable.
pub fn normalize(raw: &RawFeedItem) -> Option<FeedRecord> {
  let timestamp = match parse_pub_date(&raw.pub_date) {
    Some(ts) => ts,
    None => {
      warn!(title = %raw.title.trim(), pub_date = %raw.pub_date, "unparseable pubDate, skipping item");
      return None;
    }
  };

  Some(FeedRecord {
    title: raw.title.trim().to_string(),
    timestamp,
    description: raw.description.clone(),
    kind: extract::extract_type(&raw.description).unwrap_or_default(),
    components: extract::extract_components(&raw.description),
  })
}

/// Normalize a batch, dropping items that cannot be dated. Order is preserved.
pub fn normalize_all<'a, I>(items: I) -> Vec<FeedRecord>
where
  I: IntoIterator<Item = &'a RawFeedItem>,
{
  items.into_iter().filter_map(normalize).collect()
}

/// RSS dates are RFC 2822 (`Tue, 14 Jan 2025 10:00:00 +0000`); RFC 3339 is accepted too.
pub fn parse_pub_date(s: &str) -> Option<DateTime<Utc>> {
  let s = s.trim();
  if s.is_empty() {
    return None;
  }
  DateTime::parse_from_rfc2822(s)
    .or_else(|_| DateTime::parse_from_rfc3339(s))
    .ok()
    .map(|dt| dt.with_timezone(&Utc))
}
