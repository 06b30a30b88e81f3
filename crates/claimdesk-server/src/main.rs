//! claimdesk server binary.
//!
//! Reads `claimdesk.toml` (or the path specified with `--config`), opens the
//! SQLite claim store, and serves the JSON API plus the static front end.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use claimdesk_server::ServerConfig;
use claimdesk_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Claim Desk server")]
struct Cli {
  /// Path to the TOML configuration file. Missing files are ignored.
  #[arg(short, long, default_value = "claimdesk.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(Some(&cli.config))
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  if let Some(parent) = server_cfg
    .database_path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  // The table is created here, before any request can arrive.
  let store = SqliteStore::open(&server_cfg.database_path)
    .await
    .with_context(|| {
      format!("failed to open database at {:?}", server_cfg.database_path)
    })?;
  tracing::info!(path = ?server_cfg.database_path, "database ready");

  let app = claimdesk_server::app(Arc::new(store), &server_cfg.public_dir);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// Resolves on Ctrl+C so in-flight requests can finish.
async fn shutdown_signal() {
  match tokio::signal::ctrl_c().await {
    Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
    Err(e) => {
      tracing::error!(error = %e, "failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
  }
}
