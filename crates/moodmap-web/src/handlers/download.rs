//! CSV export of freshly ranked sectors.

use axum::{
  extract::{Path, State},
  http::header,
  response::IntoResponse,
};
use moodmap_core::{
  mode::SentimentMode, pipeline::SentimentPipeline, sector, store::UserStore,
};

use crate::{AppState, auth::CurrentUser, error::Error};

/// `GET /download/{mode}`
///
/// Streams one side of the rankings as a CSV attachment. This always runs
/// the pipeline in debug mode for current numbers instead of reading the
/// panel cache.
pub async fn csv<S, P>(
  State(state): State<AppState<S, P>>,
  _user: CurrentUser,
  Path(mode): Path<String>,
) -> Result<impl IntoResponse, Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let mode = SentimentMode::normalize(Some(&mode));
  let rankings = state
    .pipeline
    .ranked(true)
    .await
    .map_err(|e| Error::Pipeline(Box::new(e)))?;
  let body = sector::entries_to_csv(rankings.side(mode))?;

  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"sp500_sentiment_{mode}.csv\""),
      ),
    ],
    body,
  ))
}
