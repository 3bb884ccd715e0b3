//! moodmap-web server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite account store, wires the sentiment pipeline, and serves the
//! dashboard over HTTP.

use anyhow::Context;
use clap::Parser;
use moodmap_panel::{FeedClient, FeedPipeline};
use moodmap_store_sqlite::SqliteUserStore;
use moodmap_web::{AppState, DEFAULT_SECRET_KEY, ServerConfig};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
#[command(author, version, about = "S&P 500 sentiment dashboard server")]
struct Cli {
  /// Path to the configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let config: ServerConfig = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("MOODMAP"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to parse configuration")?;

  if config.secret_key == DEFAULT_SECRET_KEY {
    tracing::warn!(
      "secret_key is the development default; sessions are forgeable"
    );
  }

  let store = SqliteUserStore::open(&config.db_path).await.with_context(
    || format!("failed to open database at {}", config.db_path.display()),
  )?;

  let client = FeedClient::new(
    config.feed_url.clone(),
    std::time::Duration::from_secs(config.feed_timeout_secs),
  )
  .context("failed to build feed client")?;
  let pipeline = FeedPipeline::new(client);

  let address = format!("{}:{}", config.host, config.port);
  let app = moodmap_web::router(AppState::new(store, pipeline, config));

  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");
  axum::serve(listener, app).await?;

  Ok(())
}
