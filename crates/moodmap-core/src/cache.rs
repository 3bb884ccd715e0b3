//! Single-slot TTL cache for sentiment panels.
//!
//! The pipeline behind the dashboard is slow (network fetch plus ranking
//! plus figure rendering), while dashboard traffic is read-heavy and
//! tolerant of data up to half an hour old. [`PanelCache`] memoizes the
//! most recent [`SentimentPanel`] and serves either variant out of it until
//! the slot's age reaches the TTL, at which point the next request pays for
//! a full rebuild.
//!
//! | situation                        | behaviour                          |
//! |----------------------------------|------------------------------------|
//! | slot empty                       | rebuild, store, serve              |
//! | slot age `< ttl`                 | serve stored variant, no pipeline  |
//! | slot age `>= ttl`                | rebuild, replace slot, serve       |
//! | rebuild fails                    | error out, previous slot untouched |
//!
//! A rebuild always replaces the slot wholesale, so the two variants can
//! never come from different pipeline runs.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::{
  clock::{Clock, SystemClock},
  figure::{SentimentPanel, TreemapFigure},
  mode::SentimentMode,
  pipeline::SentimentPipeline,
};

/// Default slot lifetime, matching the upstream feed's refresh cadence.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

struct Slot {
  rebuilt_at: DateTime<Utc>,
  positive:   Arc<TreemapFigure>,
  negative:   Arc<TreemapFigure>,
}

impl Slot {
  fn figure(&self, mode: SentimentMode) -> &Arc<TreemapFigure> {
    match mode {
      SentimentMode::Positive => &self.positive,
      SentimentMode::Negative => &self.negative,
    }
  }
}

/// Shared cache in front of a [`SentimentPipeline`].
///
/// Cheap to share behind an [`Arc`]; figures are handed out as
/// [`Arc<TreemapFigure>`] so serving a hit never clones the document.
pub struct PanelCache<P, C = SystemClock> {
  pipeline: Arc<P>,
  clock:    C,
  ttl:      Duration,
  slot:     RwLock<Option<Slot>>,
}

impl<P> PanelCache<P>
where
  P: SentimentPipeline,
{
  /// Builds a cache over `pipeline` using the system clock.
  pub fn new(pipeline: Arc<P>, ttl: Duration) -> Self {
    Self::with_clock(pipeline, ttl, SystemClock)
  }
}

impl<P, C> PanelCache<P, C>
where
  P: SentimentPipeline,
  C: Clock,
{
  pub fn with_clock(pipeline: Arc<P>, ttl: Duration, clock: C) -> Self {
    Self {
      pipeline,
      clock,
      ttl,
      slot: RwLock::new(None),
    }
  }

  /// When the current slot was built, if any rebuild has succeeded yet.
  pub fn rebuilt_at(&self) -> Option<DateTime<Utc>> {
    self
      .slot
      .read()
      .expect("panel cache lock poisoned")
      .as_ref()
      .map(|slot| slot.rebuilt_at)
  }

  /// Returns the figure for `mode`, rebuilding the whole slot first if it
  /// is missing or stale.
  ///
  /// The lock is held only for the freshness check and the final store,
  /// never across the pipeline call. Requests that observe staleness
  /// concurrently therefore each run the pipeline, and the last one to
  /// finish owns the slot; every caller still receives a complete, correct
  /// panel. A failed rebuild propagates the pipeline error and leaves any
  /// previous slot in place.
  pub async fn get(
    &self,
    mode: SentimentMode,
    debug: bool,
  ) -> Result<Arc<TreemapFigure>, P::Error> {
    if let Some(figure) = self.fresh(mode) {
      tracing::debug!(%mode, "serving sentiment figure from cache");
      return Ok(figure);
    }

    tracing::info!(%mode, "sentiment panel missing or stale, rebuilding");
    let panel = self.pipeline.compute(debug).await?;
    Ok(self.store(panel, mode))
  }

  /// The stored figure for `mode`, provided the slot exists and its age is
  /// strictly below the TTL.
  fn fresh(&self, mode: SentimentMode) -> Option<Arc<TreemapFigure>> {
    let slot = self.slot.read().expect("panel cache lock poisoned");
    let slot = slot.as_ref()?;
    let age = self.clock.now().signed_duration_since(slot.rebuilt_at);
    (age < self.ttl).then(|| Arc::clone(slot.figure(mode)))
  }

  /// Replaces the slot with a fresh panel and returns the requested half.
  fn store(
    &self,
    panel: SentimentPanel,
    mode: SentimentMode,
  ) -> Arc<TreemapFigure> {
    let slot = Slot {
      rebuilt_at: self.clock.now(),
      positive:   Arc::new(panel.positive),
      negative:   Arc::new(panel.negative),
    };
    let figure = Arc::clone(slot.figure(mode));
    *self.slot.write().expect("panel cache lock poisoned") = Some(slot);
    figure
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  };

  use chrono::TimeZone;
  use serde_json::json;

  use super::*;
  use crate::sector::SectorRankings;

  #[derive(Clone)]
  struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

  impl ManualClock {
    fn starting_at(instant: DateTime<Utc>) -> Self {
      Self(Arc::new(Mutex::new(instant)))
    }

    fn advance(&self, by: Duration) {
      let mut now = self.0.lock().unwrap();
      *now = *now + by;
    }

    fn set(&self, instant: DateTime<Utc>) {
      *self.0.lock().unwrap() = instant;
    }
  }

  impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
      *self.0.lock().unwrap()
    }
  }

  #[derive(Debug, thiserror::Error)]
  #[error("pipeline refused to run")]
  struct Refused;

  /// Counts every `compute` call and can be flipped into a failing state.
  /// Successful runs are numbered so figures from different runs differ.
  #[derive(Default)]
  struct CountingPipeline {
    runs:    AtomicUsize,
    failing: AtomicBool,
  }

  impl CountingPipeline {
    fn runs(&self) -> usize {
      self.runs.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
      self.failing.store(failing, Ordering::SeqCst);
    }
  }

  impl SentimentPipeline for CountingPipeline {
    type Error = Refused;

    async fn ranked(&self, _debug: bool) -> Result<SectorRankings, Refused> {
      unimplemented!("the cache only ever calls compute")
    }

    async fn compute(&self, _debug: bool) -> Result<SentimentPanel, Refused> {
      let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
      if self.failing.load(Ordering::SeqCst) {
        return Err(Refused);
      }
      Ok(SentimentPanel {
        positive: TreemapFigure(json!({ "run": run, "side": "positive" })),
        negative: TreemapFigure(json!({ "run": run, "side": "negative" })),
      })
    }
  }

  fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 21, 12, 0, 0).unwrap()
  }

  fn cache() -> (
    Arc<CountingPipeline>,
    ManualClock,
    PanelCache<CountingPipeline, ManualClock>,
  ) {
    let pipeline = Arc::new(CountingPipeline::default());
    let clock = ManualClock::starting_at(epoch());
    let cache = PanelCache::with_clock(
      Arc::clone(&pipeline),
      Duration::minutes(DEFAULT_TTL_MINUTES),
      clock.clone(),
    );
    (pipeline, clock, cache)
  }

  #[tokio::test]
  async fn repeat_request_within_ttl_reuses_stored_figure() {
    let (pipeline, clock, cache) = cache();

    let first = cache.get(SentimentMode::Positive, false).await.unwrap();
    clock.advance(Duration::minutes(29));
    let second = cache.get(SentimentMode::Positive, false).await.unwrap();

    assert_eq!(pipeline.runs(), 1);
    assert!(Arc::ptr_eq(&first, &second));
  }

  #[tokio::test]
  async fn both_variants_come_from_the_same_run() {
    let (pipeline, clock, cache) = cache();

    let positive = cache.get(SentimentMode::Positive, false).await.unwrap();
    clock.advance(Duration::minutes(10));
    let negative = cache.get(SentimentMode::Negative, false).await.unwrap();

    assert_eq!(pipeline.runs(), 1);
    assert_eq!(positive.0["run"], 1);
    assert_eq!(negative.0["run"], 1);
    assert_eq!(negative.0["side"], "negative");

    clock.set(epoch() + Duration::minutes(31));
    let rebuilt = cache.get(SentimentMode::Positive, false).await.unwrap();

    assert_eq!(pipeline.runs(), 2);
    assert_eq!(rebuilt.0["run"], 2);
    assert_eq!(cache.rebuilt_at(), Some(epoch() + Duration::minutes(31)));
  }

  #[tokio::test]
  async fn slot_is_stale_at_exactly_the_ttl() {
    let (pipeline, clock, cache) = cache();

    cache.get(SentimentMode::Positive, false).await.unwrap();
    clock.advance(Duration::minutes(DEFAULT_TTL_MINUTES));
    cache.get(SentimentMode::Positive, false).await.unwrap();

    assert_eq!(pipeline.runs(), 2);
  }

  #[tokio::test]
  async fn failed_rebuild_keeps_the_previous_slot() {
    let (pipeline, clock, cache) = cache();

    let original = cache.get(SentimentMode::Positive, false).await.unwrap();
    assert_eq!(cache.rebuilt_at(), Some(epoch()));

    clock.advance(Duration::minutes(45));
    pipeline.set_failing(true);
    let result = cache.get(SentimentMode::Positive, false).await;

    assert!(result.is_err());
    assert_eq!(pipeline.runs(), 2);
    assert_eq!(cache.rebuilt_at(), Some(epoch()));

    // Step back inside the original window: the old figure is still there.
    clock.set(epoch() + Duration::minutes(20));
    let kept = cache.get(SentimentMode::Positive, false).await.unwrap();
    assert!(Arc::ptr_eq(&original, &kept));
    assert_eq!(pipeline.runs(), 2);
  }

  #[tokio::test]
  async fn failure_on_an_empty_cache_propagates() {
    let (pipeline, _clock, cache) = cache();
    pipeline.set_failing(true);

    let result = cache.get(SentimentMode::Negative, true).await;

    assert!(result.is_err());
    assert_eq!(cache.rebuilt_at(), None);
  }
}
