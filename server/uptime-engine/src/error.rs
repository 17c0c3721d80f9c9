//! Structured error types for feed retrieval and parsing.
//!
//! The uptime computation itself never fails; these errors belong to whatever
//! produces the records (fetcher, parser, stdin reader).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
  #[error("invalid feed address: {0}")]
  InvalidAddress(String),

  #[error("feed request failed with status {status}")]
  Transport { status: u16 },

  #[error("feed parse: {0}")]
  Parse(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl FeedError {
  pub fn invalid_address(addr: impl Into<String>) -> Self {
    Self::InvalidAddress(addr.into())
  }

  pub fn transport(status: u16) -> Self {
    Self::Transport { status }
  }

  pub fn parse(msg: impl Into<String>) -> Self {
    Self::Parse(msg.into())
  }
}
