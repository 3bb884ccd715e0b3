//! The dashboard web server.
//!
//! | Route              | Method    | Purpose                             |
//! |--------------------|-----------|-------------------------------------|
//! | `/`                | GET       | Redirect by session state           |
//! | `/register`        | GET, POST | Account creation                    |
//! | `/login`           | GET, POST | Session establishment               |
//! | `/logout`          | GET       | Session teardown                    |
//! | `/dashboard`       | GET       | Treemap page shell                  |
//! | `/api/treemap`     | GET       | Cached figure JSON for one mode     |
//! | `/download/{mode}` | GET       | Fresh rankings as a CSV attachment  |
//!
//! The last four rows require a signed session cookie; anonymous requests
//! to them are redirected to `/login`.

pub mod auth;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod templates;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use chrono::Duration;
use minijinja::Environment;
use moodmap_core::{
  cache::{DEFAULT_TTL_MINUTES, PanelCache},
  pipeline::SentimentPipeline,
  store::UserStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Fallback cookie-signing secret. Fine for local development, useless for
/// anything reachable from another machine.
pub const DEFAULT_SECRET_KEY: &str = "dev-change-me";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Server settings, all optional in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub secret_key:        String,
  pub db_path:           PathBuf,
  pub feed_url:          String,
  pub feed_timeout_secs: u64,
  pub cache_ttl_minutes: i64,
  pub pipeline_debug:    bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".to_owned(),
      port:              5000,
      secret_key:        DEFAULT_SECRET_KEY.to_owned(),
      db_path:           PathBuf::from("users.db"),
      feed_url:          "http://127.0.0.1:8600/sentiment".to_owned(),
      feed_timeout_secs: 30,
      cache_ttl_minutes: DEFAULT_TTL_MINUTES,
      pipeline_debug:    true,
    }
  }
}

// ─── Shared state ─────────────────────────────────────────────────────────────

/// State handed to every handler. The panel cache wraps the same pipeline
/// handle the CSV export calls directly.
pub struct AppState<S: UserStore, P: SentimentPipeline> {
  pub store:     Arc<S>,
  pub pipeline:  Arc<P>,
  pub cache:     Arc<PanelCache<P>>,
  pub config:    Arc<ServerConfig>,
  pub templates: Arc<Environment<'static>>,
  key:           Key,
}

impl<S, P> AppState<S, P>
where
  S: UserStore,
  P: SentimentPipeline,
{
  pub fn new(store: S, pipeline: P, config: ServerConfig) -> Self {
    let pipeline = Arc::new(pipeline);
    let cache = Arc::new(PanelCache::new(
      Arc::clone(&pipeline),
      Duration::minutes(config.cache_ttl_minutes),
    ));
    let key = auth::signing_key(&config.secret_key);
    Self {
      store: Arc::new(store),
      pipeline,
      cache,
      config: Arc::new(config),
      templates: Arc::new(templates::environment()),
      key,
    }
  }
}

impl<S: UserStore, P: SentimentPipeline> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      pipeline:  Arc::clone(&self.pipeline),
      cache:     Arc::clone(&self.cache),
      config:    Arc::clone(&self.config),
      templates: Arc::clone(&self.templates),
      key:       self.key.clone(),
    }
  }
}

impl<S: UserStore, P: SentimentPipeline> FromRef<AppState<S, P>> for Key {
  fn from_ref(state: &AppState<S, P>) -> Self {
    state.key.clone()
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

pub fn router<S, P>(state: AppState<S, P>) -> Router
where
  S: UserStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  P: SentimentPipeline + 'static,
{
  Router::new()
    .route("/",                get(handlers::auth::home::<S, P>))
    .route(
      "/register",
      get(handlers::auth::register_page::<S, P>)
        .post(handlers::auth::register_submit::<S, P>),
    )
    .route(
      "/login",
      get(handlers::auth::login_page::<S, P>)
        .post(handlers::auth::login_submit::<S, P>),
    )
    .route("/logout",          get(handlers::auth::logout::<S, P>))
    .route("/dashboard",       get(handlers::dashboard::page::<S, P>))
    .route("/api/treemap",     get(handlers::treemap::figure::<S, P>))
    .route("/download/{mode}", get(handlers::download::csv::<S, P>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
