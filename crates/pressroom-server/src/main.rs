//! pressroom-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the back-office JSON API over HTTP
//! under `/api`, plus a bare `/health` liveness route.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use pressroom_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Runtime server configuration, deserialised from `config.toml` and the
/// `PRESSROOM_`-prefixed environment.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:       String,
  port:       u16,
  store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".into(),
      port:       8080,
      store_path: PathBuf::from("pressroom.db"),
    }
  }
}

#[derive(Parser)]
#[command(author, version, about = "Pressroom back-office server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration; the file is optional, defaults cover local use.
  let defaults = ServerConfig::default();
  let settings = config::Config::builder()
    .set_default("host", defaults.host.clone())?
    .set_default("port", i64::from(defaults.port))?
    .set_default(
      "store_path",
      defaults.store_path.to_string_lossy().to_string(),
    )?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PRESSROOM"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = axum::Router::new()
    .route("/health", axum::routing::get(|| async { "ok" }))
    .nest("/api", pressroom_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
