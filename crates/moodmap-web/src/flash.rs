//! One-shot flash messages carried in a signed cookie.
//!
//! A handler that redirects queues a message with [`set`]; the page handler
//! on the other side of the redirect collects it with [`take`], which also
//! removes the cookie so the message renders exactly once.

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const FLASH_COOKIE: &str = "flash";

/// Queue `message` for the next page render.
pub fn set(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
  jar.add(
    Cookie::build((FLASH_COOKIE, message.to_owned()))
      .path("/")
      .http_only(true)
      .build(),
  )
}

/// Remove and return the pending message, if any.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
  match jar.get(FLASH_COOKIE) {
    Some(cookie) => {
      let message = cookie.value().to_owned();
      let jar =
        jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
      (jar, Some(message))
    }
    None => (jar, None),
  }
}
