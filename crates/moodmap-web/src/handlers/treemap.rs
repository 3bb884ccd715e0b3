//! JSON endpoint serving figures out of the panel cache.

use axum::{
  Json,
  extract::{Query, State},
};
use moodmap_core::{
  mode::SentimentMode, pipeline::SentimentPipeline, store::UserStore,
};
use serde::Deserialize;

use crate::{AppState, auth::CurrentUser, error::Error};

#[derive(Debug, Deserialize)]
pub struct TreemapQuery {
  mode: Option<String>,
}

/// `GET /api/treemap?mode=positive|negative`
///
/// Serves the requested figure from the panel cache; unrecognized modes
/// fall back to the positive view rather than erroring.
pub async fn figure<S, P>(
  State(state): State<AppState<S, P>>,
  _user: CurrentUser,
  Query(query): Query<TreemapQuery>,
) -> Result<Json<moodmap_core::figure::TreemapFigure>, Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let mode = SentimentMode::normalize(query.mode.as_deref());
  let figure = state
    .cache
    .get(mode, state.config.pipeline_debug)
    .await
    .map_err(|e| Error::Pipeline(Box::new(e)))?;
  Ok(Json((*figure).clone()))
}
