//! The positive/negative mode attached to figure requests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two figure variants a pipeline run produces.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SentimentMode {
  #[default]
  Positive,
  Negative,
}

impl SentimentMode {
  /// Normalizes a raw request value into a mode.
  ///
  /// Comparison ignores case and surrounding whitespace. Any value outside
  /// the known set, including an absent one, becomes
  /// [`SentimentMode::Positive`], so callers downstream of this never see
  /// an out-of-set mode.
  pub fn normalize(raw: Option<&str>) -> Self {
    let Some(raw) = raw else {
      return SentimentMode::Positive;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
      "negative" => SentimentMode::Negative,
      _ => SentimentMode::Positive,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      SentimentMode::Positive => "positive",
      SentimentMode::Negative => "negative",
    }
  }
}

impl fmt::Display for SentimentMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
