//! Field extraction from free-text status descriptions.
//!
//! Recognized labels (case-insensitive, not anchored to line start):
//! - `Type: <word>`
//! - `Affected Components: a, b, c` (rest of the line)
//! - `Duration: N hours and M minutes` (rest of the line)
//!
//! First occurrence of a label wins. Nothing here fails: an unrecognized or
//! missing field is simply absent.

use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  static ref DURATION_LINE: Regex = Regex::new(r"(?i)Duration:[ \t]*([^\n\r]+)").unwrap();
  static ref HOURS: Regex = Regex::new(r"(?i)([0-9]+)\s*hour").unwrap();
  static ref MINUTES: Regex = Regex::new(r"(?i)([0-9]+)\s*minute").unwrap();
  static ref TYPE_TAG: Regex = Regex::new(r"(?i)Type:\s*([A-Za-z]+)").unwrap();
  static ref COMPONENTS_LINE: Regex =
    Regex::new(r"(?i)Affected Components:[ \t]*([^\n\r]+)").unwrap();
}

/// Parse the `Duration:` line of a description.
///
/// Hours and minutes are located independently; a missing part counts as zero.
/// Returns `None` when the label is absent or the total is zero, so untimed and
/// zero-length entries are treated the same way.
pub fn extract_duration(text: &str) -> Option<Duration> {
  if text.is_empty() {
    return None;
  }
  let line = DURATION_LINE.captures(text)?.get(1)?.as_str();

  let hours = leading_amount(&HOURS, line)?;
  let minutes = leading_amount(&MINUTES, line)?;
  if hours == 0 && minutes == 0 {
    return None;
  }

  Duration::try_hours(hours)?.checked_add(&Duration::try_minutes(minutes)?)
}

/// Amount captured by `re` in `line`: `Some(0)` when absent, `None` when it overflows.
fn leading_amount(re: &Regex, line: &str) -> Option<i64> {
  match re.captures(line).and_then(|c| c.get(1)) {
    Some(m) => m.as_str().parse().ok(),
    None => Some(0),
  }
}

/// Lower-cased word following `Type:`.
pub fn extract_type(text: &str) -> Option<String> {
  if text.is_empty() {
    return None;
  }
  let word = TYPE_TAG.captures(text)?.get(1)?.as_str();
  Some(word.trim().to_ascii_lowercase())
}

/// Comma-separated names on the `Affected Components:` line, trimmed, in order.
pub fn extract_components(text: &str) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }
  let line = match COMPONENTS_LINE.captures(text).and_then(|c| c.get(1)) {
    Some(m) => m.as_str(),
    None => return Vec::new(),
  };
  line
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(String::from)
    .collect()
}
