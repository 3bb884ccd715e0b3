//! Chart-ready figure documents produced by a pipeline run.

use serde::{Deserialize, Serialize};

/// A chart-ready figure document, stored as the standard `{data, layout}`
/// JSON tree the browser-side plotting library consumes.
///
/// The document is opaque once built: nothing inspects or mutates it after
/// the pipeline produces it, it is only serialized back out to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreemapFigure(pub serde_json::Value);

/// Both figure variants of a single pipeline run.
///
/// The halves always come from the same underlying data snapshot; there is
/// no way to construct a panel from two different runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentPanel {
  pub positive: TreemapFigure,
  pub negative: TreemapFigure,
}
