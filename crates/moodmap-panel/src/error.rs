//! Error type for `moodmap-panel`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("feed request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("feed returned status {0}")]
  UnexpectedStatus(reqwest::StatusCode),

  /// The feed produced a row that fails validation; the message names the
  /// offending row.
  #[error("invalid feed row: {0}")]
  InvalidRow(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
