//! Engine configuration with sane defaults.

/// Default trailing window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Tunables for an uptime computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// Length of the trailing analysis window in days (fixed 86400 s per day).
  pub window_days: i64,
  /// Required uptime percentage. Overall or component uptime below it is flagged.
  pub target_uptime: Option<f64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      window_days: DEFAULT_WINDOW_DAYS,
      target_uptime: None,
    }
  }
}

impl Config {
  pub fn with_window_days(mut self, days: i64) -> Self {
    self.window_days = days;
    self
  }

  pub fn with_target_uptime(mut self, pct: f64) -> Self {
    self.target_uptime = Some(pct);
    self
  }
}
