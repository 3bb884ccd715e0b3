//! Handler for the dashboard page shell.

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::SignedCookieJar;
use minijinja::context;
use moodmap_core::{pipeline::SentimentPipeline, store::UserStore};

use crate::{AppState, auth::CurrentUser, error::Error, flash, templates};

/// `GET /dashboard`: the treemap page shell. Figures themselves load
/// client-side from `/api/treemap`.
pub async fn page<S, P>(
  State(state): State<AppState<S, P>>,
  CurrentUser(user): CurrentUser,
  jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let (jar, flash) = flash::take(jar);
  let page = templates::render(
    &state.templates,
    "dashboard.html",
    context! { username => user.username, flash },
  )?;
  Ok((jar, page))
}
