//! The `SentimentPipeline` trait implemented by production pipelines.

use std::future::Future;

use crate::{figure::SentimentPanel, sector::SectorRankings};

/// Interface to the sentiment pipeline: fetch coverage, rank constituents
/// per sector, render figure documents.
///
/// A full run is expensive, which is why reads normally go through
/// [`PanelCache`](crate::cache::PanelCache) instead of calling
/// [`compute`](SentimentPipeline::compute) directly. `debug` widens the
/// implementation's own diagnostics for one run and must not change its
/// output.
pub trait SentimentPipeline: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetches and ranks the per-sector rows, without rendering figures.
  ///
  /// This is the data the CSV export serves, and always reflects a fresh
  /// fetch rather than a cached panel.
  fn ranked(
    &self,
    debug: bool,
  ) -> impl Future<Output = Result<SectorRankings, Self::Error>> + Send + '_;

  /// Runs the pipeline end to end, producing both figure variants from one
  /// data snapshot.
  fn compute(
    &self,
    debug: bool,
  ) -> impl Future<Output = Result<SentimentPanel, Self::Error>> + Send + '_;
}
