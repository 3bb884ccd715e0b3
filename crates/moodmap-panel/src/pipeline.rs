//! [`FeedPipeline`], the production [`SentimentPipeline`].

use std::time::Instant;

use moodmap_core::{
  figure::SentimentPanel, pipeline::SentimentPipeline, sector::SectorRankings,
};

use crate::{
  Result, feed::FeedClient, figure::render_panel, rank::rank_rows,
};

/// Fetches rows from the sentiment feed, ranks them per sector, renders
/// both figure variants.
pub struct FeedPipeline {
  client: FeedClient,
}

impl FeedPipeline {
  pub fn new(client: FeedClient) -> Self {
    Self { client }
  }
}

impl SentimentPipeline for FeedPipeline {
  type Error = crate::Error;

  async fn ranked(&self, debug: bool) -> Result<SectorRankings> {
    let rows = self.client.fetch_rows(debug).await?;
    Ok(rank_rows(rows))
  }

  async fn compute(&self, debug: bool) -> Result<SentimentPanel> {
    let started = Instant::now();
    let rankings = self.ranked(debug).await?;
    let panel = render_panel(&rankings);
    tracing::info!(
      elapsed_ms = started.elapsed().as_millis() as u64,
      top = rankings.top.len(),
      low = rankings.low.len(),
      "rebuilt sentiment panel"
    );
    Ok(panel)
  }
}
