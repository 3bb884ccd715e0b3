//! Handlers for the account routes.
//!
//! Both forms trim their fields before validation, and every failure leg
//! queues a flash message and redirects back to the form. The login
//! failure message never reveals whether the username or the password was
//! wrong.

use axum::{
  Form,
  extract::State,
  response::{Html, Redirect},
};
use axum_extra::extract::cookie::SignedCookieJar;
use minijinja::context;
use moodmap_core::{
  pipeline::SentimentPipeline,
  store::{CreateUserError, UserStore},
  user::NewUser,
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{self, CurrentUser},
  error::Error,
  flash, templates,
};

/// Credentials from the login or registration form. Missing fields arrive
/// as empty strings, like an empty submission.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

// ─── Landing ──────────────────────────────────────────────────────────────────

/// `GET /`: route by session state.
pub async fn home<S, P>(
  State(state): State<AppState<S, P>>,
  jar: SignedCookieJar,
) -> Result<Redirect, Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let signed_in = match auth::session_user_id(&jar) {
    Some(id) => state
      .store
      .find_by_id(id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .is_some(),
    None => false,
  };

  Ok(if signed_in {
    Redirect::to("/dashboard")
  } else {
    Redirect::to("/login")
  })
}

// ─── Registration ─────────────────────────────────────────────────────────────

/// `GET /register`
pub async fn register_page<S, P>(
  State(state): State<AppState<S, P>>,
  jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let (jar, flash) = flash::take(jar);
  let page =
    templates::render(&state.templates, "register.html", context! { flash })?;
  Ok((jar, page))
}

/// `POST /register`
///
/// The duplicate check here is best-effort; two concurrent submissions of
/// the same name can both pass it. The unique constraint still rejects the
/// losing insert, and that path gets the same flash as a pre-checked
/// duplicate.
pub async fn register_submit<S, P>(
  State(state): State<AppState<S, P>>,
  jar: SignedCookieJar,
  Form(form): Form<CredentialsForm>,
) -> Result<(SignedCookieJar, Redirect), Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let username = form.username.trim();
  let password = form.password.trim();

  if username.is_empty() || password.is_empty() {
    let jar = flash::set(jar, "Username and password required.");
    return Ok((jar, Redirect::to("/register")));
  }

  let existing = state
    .store
    .find_by_username(username)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if existing.is_some() {
    let jar = flash::set(jar, "Username already exists.");
    return Ok((jar, Redirect::to("/register")));
  }

  let password_hash = auth::hash_password(password)?;
  let created = state
    .store
    .create_user(NewUser {
      username: username.to_owned(),
      password_hash,
    })
    .await;

  match created {
    Ok(_) => {
      tracing::info!(username, "registered new account");
      let jar = flash::set(jar, "Registration successful. Please log in.");
      Ok((jar, Redirect::to("/login")))
    }
    Err(CreateUserError::UsernameTaken) => {
      let jar = flash::set(jar, "Username already exists.");
      Ok((jar, Redirect::to("/register")))
    }
    Err(CreateUserError::Store(err)) => Err(Error::Store(Box::new(err))),
  }
}

// ─── Login / logout ───────────────────────────────────────────────────────────

/// `GET /login`
pub async fn login_page<S, P>(
  State(state): State<AppState<S, P>>,
  jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let (jar, flash) = flash::take(jar);
  let page =
    templates::render(&state.templates, "login.html", context! { flash })?;
  Ok((jar, page))
}

/// `POST /login`
pub async fn login_submit<S, P>(
  State(state): State<AppState<S, P>>,
  jar: SignedCookieJar,
  Form(form): Form<CredentialsForm>,
) -> Result<(SignedCookieJar, Redirect), Error>
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  let username = form.username.trim();
  let password = form.password.trim();

  let user = state
    .store
    .find_by_username(username)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  if let Some(user) = user
    && auth::verify_password(password, &user.password_hash)
  {
    tracing::info!(username, "login succeeded");
    let jar = auth::establish_session(jar, user.id);
    return Ok((jar, Redirect::to("/dashboard")));
  }

  let jar = flash::set(jar, "Invalid username or password.");
  Ok((jar, Redirect::to("/login")))
}

/// `GET /logout`: end the session.
pub async fn logout<S, P>(
  _user: CurrentUser,
  jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect)
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  (auth::clear_session(jar), Redirect::to("/login"))
}
