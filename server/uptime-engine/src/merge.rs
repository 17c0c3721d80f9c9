//! Interval merging: minimal sorted cover of a set of downtime spans.

use crate::types::TimeInterval;

/// Merge overlapping or touching intervals.
///
/// Output is sorted by start, non-overlapping, and no two entries touch
/// (`[a, b)` and `[b, c)` become `[a, c)`).
pub fn merge(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
  let mut sorted = intervals.to_vec();
  sorted.sort_unstable_by_key(|iv| iv.start());

  let mut iter = sorted.into_iter();
  let mut current = match iter.next() {
    Some(iv) => iv,
    None => return Vec::new(),
  };

  let mut merged = Vec::new();
  for iv in iter {
    if iv.start() <= current.end() {
      current.extend_to(iv.end());
    } else {
      merged.push(current);
      current = iv;
    }
  }
  merged.push(current);
  merged
}

/// Sum of interval lengths.
pub fn total_duration(intervals: &[TimeInterval]) -> chrono::Duration {
  intervals
    .iter()
    .fold(chrono::Duration::zero(), |acc, iv| acc + iv.duration())
}
