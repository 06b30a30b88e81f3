//! HTTP server assembly for Claim Desk.
//!
//! Combines the JSON API from `claimdesk-api`, a redirect from `/` to the
//! listing page, and static files for the browser front end.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, response::Redirect, routing::get};
use claimdesk_core::store::ClaimStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

pub const DEFAULT_PORT: u16 = 3000;

/// Runtime server configuration, deserialised from `claimdesk.toml` and
/// `CLAIMDESK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite database file; created on first start.
  pub database_path: PathBuf,
  /// Directory holding `index.html`, `form.html` and `app.js`.
  pub public_dir:    PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `file`, and the environment,
  /// later sources winning.
  pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
    let mut builder = config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("database_path", "claimdesk.db")?
      .set_default("public_dir", "public")?;

    if let Some(file) = file {
      builder = builder.add_source(config::File::from(file).required(false));
    }

    let mut cfg: Self = builder
      .add_source(config::Environment::with_prefix("CLAIMDESK"))
      .build()?
      .try_deserialize()?;

    cfg.database_path = expand_tilde(&cfg.database_path);
    cfg.public_dir = expand_tilde(&cfg.public_dir);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// Anything not matched by `/` or `/api/*` is served from `public_dir`.
pub fn app<S>(store: Arc<S>, public_dir: &Path) -> Router
where
  S: ClaimStore + 'static,
{
  Router::new()
    .route("/", get(|| async { Redirect::to("/index.html") }))
    .nest("/api", claimdesk_api::api_router(store))
    .fallback_service(ServeDir::new(public_dir))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use claimdesk_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn test_app(public_dir: &Path) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    app(Arc::new(store), public_dir)
  }

  fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
  }

  #[tokio::test]
  async fn root_redirects_to_listing_page() {
    let resp = test_app(Path::new("public"))
      .await
      .oneshot(get_req("/"))
      .await
      .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()[header::LOCATION], "/index.html");
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let resp = test_app(Path::new("public"))
      .await
      .oneshot(get_req("/api/claims"))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn static_files_are_served_from_public_dir() {
    let dir = std::env::temp_dir().join(format!(
      "claimdesk-public-{}",
      std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>claims</h1>").unwrap();

    let app = test_app(&dir).await;
    let resp = app.clone().oneshot(get_req("/index.html")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>claims</h1>");

    let resp = app.oneshot(get_req("/missing.html")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/claims.db")),
      PathBuf::from(home).join("claims.db")
    );
    assert_eq!(expand_tilde(Path::new("/var/claims.db")), PathBuf::from("/var/claims.db"));
  }

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Some(Path::new("/nonexistent/claimdesk.toml"))).unwrap();
    assert_eq!(cfg.database_path, PathBuf::from("claimdesk.db"));
    assert_eq!(cfg.public_dir, PathBuf::from("public"));
    assert_eq!(cfg.address(), format!("{}:{}", cfg.host, cfg.port));
  }
}
