//! HTTP client for the upstream sentiment feed.

use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Result};

/// One constituent as reported by the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedRow {
  pub ticker:   String,
  pub company:  String,
  pub sector:   String,
  /// Mean sentiment score in `[-1.0, 1.0]`.
  pub score:    f64,
  /// Pieces of coverage behind the score.
  pub mentions: u32,
}

impl FeedRow {
  /// Checks the invariants the ranking and figure stages assume.
  fn validate(&self) -> Result<()> {
    if self.ticker.trim().is_empty() || self.sector.trim().is_empty() {
      return Err(Error::InvalidRow(format!(
        "missing ticker or sector: {self:?}"
      )));
    }
    if !self.score.is_finite() || self.score.abs() > 1.0 {
      return Err(Error::InvalidRow(format!(
        "score out of range for {}: {}",
        self.ticker, self.score
      )));
    }
    Ok(())
  }
}

/// Client for the sentiment feed endpoint.
pub struct FeedClient {
  url:  String,
  http: reqwest::Client,
}

impl FeedClient {
  /// Builds a client for the feed at `url`. Requests abort after `timeout`.
  pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self {
      url: url.into(),
      http,
    })
  }

  /// Fetches the current rows and validates every one of them. With
  /// `debug` set, each row is logged as it passes validation.
  pub async fn fetch_rows(&self, debug: bool) -> Result<Vec<FeedRow>> {
    let response = self.http.get(&self.url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(Error::UnexpectedStatus(status));
    }

    let rows: Vec<FeedRow> = response.json().await?;
    for row in &rows {
      row.validate()?;
      if debug {
        tracing::debug!(
          ticker = %row.ticker,
          sector = %row.sector,
          score = row.score,
          mentions = row.mentions,
          "feed row"
        );
      }
    }

    if debug {
      tracing::info!(url = %self.url, rows = rows.len(), "fetched sentiment feed");
    } else {
      tracing::debug!(rows = rows.len(), "fetched sentiment feed");
    }
    Ok(rows)
  }
}
