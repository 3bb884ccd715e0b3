//! Password hashing and the session cookie layer.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use moodmap_core::{pipeline::SentimentPipeline, store::UserStore, user::User};
use rand_core::OsRng;
use sha2::{Digest, Sha512};

use crate::{AppState, error::Error};

/// Name of the signed session cookie. The value is the account id.
const SESSION_COOKIE: &str = "session";

// ─── Passwords ────────────────────────────────────────────────────────────────

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| Error::Hash(e.to_string()))?
      .to_string(),
  )
}

/// Verify a password against a stored PHC string.
///
/// A malformed stored hash verifies as false; the caller cannot tell it
/// apart from a wrong password.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(password_hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Session cookies ──────────────────────────────────────────────────────────

/// Derive the cookie signing key from the configured secret.
///
/// Hashing first lets a secret of any length satisfy the signing key's
/// 64-byte minimum.
pub fn signing_key(secret: &str) -> Key {
  let digest = Sha512::digest(secret.as_bytes());
  Key::from(digest.as_slice())
}

/// Store `user_id` in the session cookie.
pub fn establish_session(jar: SignedCookieJar, user_id: i64) -> SignedCookieJar {
  jar.add(
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .build(),
  )
}

/// Drop the session cookie.
pub fn clear_session(jar: SignedCookieJar) -> SignedCookieJar {
  jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}

/// The account id carried by a valid session cookie, if any.
pub fn session_user_id(jar: &SignedCookieJar) -> Option<i64> {
  jar.get(SESSION_COOKIE)?.value().parse().ok()
}

// ─── Extractor ────────────────────────────────────────────────────────────────

/// The logged-in account behind the request.
///
/// Present in a handler's signature, this guards the route: a request with
/// no valid session, or whose account no longer exists, is redirected to
/// the login page by the rejection.
pub struct CurrentUser(pub User);

impl<S, P> FromRequestParts<AppState<S, P>> for CurrentUser
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, P>,
  ) -> Result<Self, Self::Rejection> {
    let jar = match SignedCookieJar::from_request_parts(parts, state).await {
      Ok(jar) => jar,
      Err(err) => match err {},
    };

    let id = session_user_id(&jar).ok_or(Error::Unauthenticated)?;
    let user = state
      .store
      .find_by_id(id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    user.map(CurrentUser).ok_or(Error::Unauthenticated)
  }
}
