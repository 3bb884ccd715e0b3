//! Ranked sector entries and their CSV encoding.

use serde::{Deserialize, Serialize};

use crate::mode::SentimentMode;

/// One ranked constituent: a ticker grouped under its GICS sector.
///
/// Field order doubles as the CSV column order, so reordering fields here
/// changes the export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorEntry {
  pub sector:   String,
  pub ticker:   String,
  pub company:  String,
  /// Mean sentiment score over the sampled coverage, in `[-1.0, 1.0]`.
  pub score:    f64,
  /// How many pieces of coverage produced the score. Used as the treemap
  /// cell weight.
  pub mentions: u32,
}

/// Output of one ranking pass over the feed: per sector, the constituents
/// with the highest and lowest scores.
///
/// The two sides are selected independently, so in a sector with fewer
/// constituents than the per-side limit the same ticker can appear on both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorRankings {
  pub top: Vec<SectorEntry>,
  pub low: Vec<SectorEntry>,
}

impl SectorRankings {
  /// The side of the rankings backing `mode`.
  pub fn side(&self, mode: SentimentMode) -> &[SectorEntry] {
    match mode {
      SentimentMode::Positive => &self.top,
      SentimentMode::Negative => &self.low,
    }
  }
}

/// Encodes entries as CSV, entirely in memory.
///
/// The header row is always present, even for an empty slice.
pub fn entries_to_csv(entries: &[SectorEntry]) -> Result<String, csv::Error> {
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(Vec::new());
  writer.write_record(["sector", "ticker", "company", "score", "mentions"])?;
  for entry in entries {
    writer.serialize(entry)?;
  }
  writer.flush().map_err(csv::Error::from)?;
  let bytes = writer.into_inner().expect("csv buffer already flushed");
  Ok(String::from_utf8(bytes).expect("csv output is utf-8"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(
    sector: &str,
    ticker: &str,
    company: &str,
    score: f64,
    mentions: u32,
  ) -> SectorEntry {
    SectorEntry {
      sector: sector.into(),
      ticker: ticker.into(),
      company: company.into(),
      score,
      mentions,
    }
  }

  #[test]
  fn csv_has_header_and_one_row_per_entry() {
    let entries = vec![
      entry("Information Technology", "AAPL", "Apple Inc.", 0.42, 128),
      entry("Energy", "XOM", "Exxon Mobil", -0.13, 57),
    ];

    let csv = entries_to_csv(&entries).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("sector,ticker,company,score,mentions"));
    assert_eq!(
      lines.next(),
      Some("Information Technology,AAPL,Apple Inc.,0.42,128")
    );
    assert_eq!(lines.next(), Some("Energy,XOM,Exxon Mobil,-0.13,57"));
    assert_eq!(lines.next(), None);
  }

  #[test]
  fn csv_quotes_fields_containing_commas() {
    let entries =
      vec![entry("Industrials", "MMM", "3M Company, Inc.", 0.05, 9)];

    let csv = entries_to_csv(&entries).unwrap();
    assert!(csv.contains("\"3M Company, Inc.\""));
  }

  #[test]
  fn csv_of_no_entries_is_header_only() {
    let csv = entries_to_csv(&[]).unwrap();
    assert_eq!(csv.trim_end(), "sector,ticker,company,score,mentions");
  }

  #[test]
  fn side_selects_matching_half() {
    let rankings = SectorRankings {
      top: vec![entry("Energy", "XOM", "Exxon Mobil", 0.4, 3)],
      low: vec![entry("Energy", "OXY", "Occidental", -0.2, 5)],
    };

    assert_eq!(rankings.side(SentimentMode::Positive)[0].ticker, "XOM");
    assert_eq!(rankings.side(SentimentMode::Negative)[0].ticker, "OXY");
  }
}
