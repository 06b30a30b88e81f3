//! JSON REST API for Claim Desk.
//!
//! Exposes an axum [`Router`] backed by any [`claimdesk_core::store::ClaimStore`].
//! Static files, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", claimdesk_api::api_router(store.clone()))
//! ```

pub mod claims;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use claimdesk_core::store::ClaimStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ClaimStore + 'static,
{
  Router::new()
    .route("/claims", get(claims::list::<S>).post(claims::create::<S>))
    .route("/claims/{id}", get(claims::get_one::<S>).delete(claims::delete::<S>))
    .route("/claims/{id}/complete", put(claims::complete::<S>))
    .with_state(store)
}
