//! Web-layer error type and its [`IntoResponse`] mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request carries no valid session.
  #[error("authentication required")]
  Unauthenticated,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("pipeline error: {0}")]
  Pipeline(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("password hashing error: {0}")]
  Hash(String),

  #[error("template error: {0}")]
  Template(#[from] minijinja::Error),

  #[error("csv encoding error: {0}")]
  Csv(#[from] csv::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthenticated => Redirect::to("/login").into_response(),
      other => {
        tracing::error!(error = %other, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
          .into_response()
      }
    }
  }
}
