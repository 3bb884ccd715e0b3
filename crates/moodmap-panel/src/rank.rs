//! Per-sector selection of the strongest and weakest constituents.

use std::collections::BTreeMap;

use moodmap_core::sector::{SectorEntry, SectorRankings};

use crate::feed::FeedRow;

/// How many constituents each side keeps per sector.
pub const PER_SECTOR: usize = 5;

/// Selects the top and bottom [`PER_SECTOR`] constituents of every sector.
///
/// Sectors are emitted in alphabetical order so repeated runs over the same
/// rows produce identical output. Within a sector, tied scores keep the
/// feed's row order. The two sides are selected independently from the
/// original rows, so in a sector with fewer than `2 * PER_SECTOR`
/// constituents the same ticker can appear on both.
pub fn rank_rows(rows: Vec<FeedRow>) -> SectorRankings {
  let mut sectors: BTreeMap<String, Vec<FeedRow>> = BTreeMap::new();
  for row in rows {
    sectors.entry(row.sector.clone()).or_default().push(row);
  }

  let mut rankings = SectorRankings::default();
  for rows in sectors.into_values() {
    let mut top = rows.clone();
    top.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut low = rows;
    low.sort_by(|a, b| a.score.total_cmp(&b.score));

    rankings
      .top
      .extend(top.into_iter().take(PER_SECTOR).map(entry));
    rankings
      .low
      .extend(low.into_iter().take(PER_SECTOR).map(entry));
  }
  rankings
}

fn entry(row: FeedRow) -> SectorEntry {
  SectorEntry {
    sector:   row.sector,
    ticker:   row.ticker,
    company:  row.company,
    score:    row.score,
    mentions: row.mentions,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(ticker: &str, sector: &str, score: f64) -> FeedRow {
    FeedRow {
      ticker:   ticker.to_owned(),
      company:  format!("{ticker} Inc."),
      sector:   sector.to_owned(),
      score,
      mentions: 10,
    }
  }

  fn tickers(entries: &[SectorEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.ticker.as_str()).collect()
  }

  #[test]
  fn keeps_at_most_five_per_side_and_sector() {
    let rows = (0..7)
      .map(|i| row(&format!("T{i}"), "Energy", f64::from(i) / 10.0))
      .collect();

    let rankings = rank_rows(rows);
    assert_eq!(tickers(&rankings.top), ["T6", "T5", "T4", "T3", "T2"]);
    assert_eq!(tickers(&rankings.low), ["T0", "T1", "T2", "T3", "T4"]);
  }

  #[test]
  fn small_sector_appears_on_both_sides() {
    let rows = vec![row("A", "Utilities", 0.3), row("B", "Utilities", -0.1)];

    let rankings = rank_rows(rows);
    assert_eq!(tickers(&rankings.top), ["A", "B"]);
    assert_eq!(tickers(&rankings.low), ["B", "A"]);
  }

  #[test]
  fn sectors_are_emitted_alphabetically() {
    let rows = vec![
      row("UTL", "Utilities", 0.2),
      row("NRG", "Energy", 0.4),
      row("FIN", "Financials", -0.3),
    ];

    let rankings = rank_rows(rows);
    let sectors: Vec<&str> =
      rankings.top.iter().map(|e| e.sector.as_str()).collect();
    assert_eq!(sectors, ["Energy", "Financials", "Utilities"]);
  }

  #[test]
  fn tied_scores_keep_feed_order_on_both_sides() {
    let rows = vec![
      row("AAA", "Energy", 0.5),
      row("BBB", "Energy", 0.5),
      row("CCC", "Energy", 0.5),
    ];

    let rankings = rank_rows(rows);
    assert_eq!(tickers(&rankings.top), ["AAA", "BBB", "CCC"]);
    assert_eq!(tickers(&rankings.low), ["AAA", "BBB", "CCC"]);
  }

  #[test]
  fn no_rows_rank_to_nothing() {
    let rankings = rank_rows(Vec::new());
    assert!(rankings.top.is_empty());
    assert!(rankings.low.is_empty());
  }
}
