//! Treemap figure rendering.
//!
//! Produces plain `{data, layout}` JSON documents the browser-side plotting
//! library consumes as-is; nothing server-side ever reads them back.

use std::collections::BTreeMap;

use moodmap_core::{
  figure::{SentimentPanel, TreemapFigure},
  mode::SentimentMode,
  sector::{SectorEntry, SectorRankings},
};
use serde_json::json;

/// Label of the synthetic root node.
const ROOT_LABEL: &str = "S&P 500";

/// Numeric bounds of the score colour scale.
const SCORE_MIN: f64 = -1.0;
const SCORE_MAX: f64 = 1.0;

/// Renders both figure variants from one set of rankings.
pub fn render_panel(rankings: &SectorRankings) -> SentimentPanel {
  SentimentPanel {
    positive: render_figure(
      SentimentMode::Positive,
      rankings.side(SentimentMode::Positive),
    ),
    negative: render_figure(
      SentimentMode::Negative,
      rankings.side(SentimentMode::Negative),
    ),
  }
}

fn title(mode: SentimentMode) -> &'static str {
  match mode {
    SentimentMode::Positive => {
      "S&P 500 sentiment: strongest constituents per sector"
    }
    SentimentMode::Negative => {
      "S&P 500 sentiment: weakest constituents per sector"
    }
  }
}

/// Renders one treemap document: a synthetic root, one node per sector, one
/// leaf per constituent.
///
/// Cell area is the constituent's mention count. Branch nodes carry the sum
/// of their children, which is what `branchvalues: "total"` requires of the
/// hierarchy. Cell colour is the sentiment score; branch colour is the
/// mention-weighted mean of the scores underneath.
fn render_figure(
  mode: SentimentMode,
  entries: &[SectorEntry],
) -> TreemapFigure {
  let mut sectors: BTreeMap<&str, Vec<&SectorEntry>> = BTreeMap::new();
  for entry in entries {
    sectors.entry(entry.sector.as_str()).or_default().push(entry);
  }

  let mut labels: Vec<String> = vec![ROOT_LABEL.to_owned()];
  let mut parents: Vec<String> = vec![String::new()];
  let mut values: Vec<u64> = vec![0];
  let mut colors: Vec<f64> = vec![0.0];
  let mut hover: Vec<String> = vec![String::new()];

  for (sector, rows) in &sectors {
    labels.push((*sector).to_owned());
    parents.push(ROOT_LABEL.to_owned());
    values.push(rows.iter().map(|r| u64::from(r.mentions)).sum());
    colors.push(weighted_mean_score(rows));
    hover.push(String::new());

    for row in rows {
      labels.push(row.ticker.clone());
      parents.push((*sector).to_owned());
      values.push(u64::from(row.mentions));
      colors.push(row.score);
      hover.push(format!("{}<br>score {:.3}", row.company, row.score));
    }
  }

  let all: Vec<&SectorEntry> = entries.iter().collect();
  values[0] = all.iter().map(|r| u64::from(r.mentions)).sum();
  colors[0] = weighted_mean_score(&all);

  TreemapFigure(json!({
    "data": [{
      "type": "treemap",
      "labels": labels,
      "parents": parents,
      "values": values,
      "text": hover,
      "branchvalues": "total",
      "textinfo": "label",
      "hovertemplate": "%{label}<br>%{text}<br>mentions: %{value}<extra></extra>",
      "marker": {
        "colors": colors,
        "colorscale": "RdYlGn",
        "cmin": SCORE_MIN,
        "cmid": 0.0,
        "cmax": SCORE_MAX,
        "colorbar": { "title": { "text": "score" } },
      },
    }],
    "layout": {
      "title": { "text": title(mode) },
      "margin": { "t": 48, "l": 8, "r": 8, "b": 8 },
    },
  }))
}

fn weighted_mean_score(rows: &[&SectorEntry]) -> f64 {
  let weight: u64 = rows.iter().map(|r| u64::from(r.mentions)).sum();
  if weight == 0 {
    return 0.0;
  }
  let weighted: f64 = rows
    .iter()
    .map(|r| r.score * f64::from(r.mentions))
    .sum();
  weighted / weight as f64
}
