//! The `ClaimStore` trait.
//!
//! Implemented by storage backends (e.g. `claimdesk-store-sqlite`). The HTTP
//! layer (`claimdesk-api`) depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  claim::{Claim, ClaimDraft, ClaimId},
  error::ClassifyError,
};

/// Abstraction over a Claim Desk storage backend.
///
/// Validation and the two lifecycle rules live behind this trait: a claim is
/// only ever completed (never re-activated), and a completed claim can't be
/// deleted.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ClaimStore: Send + Sync {
  type Error: std::error::Error + ClassifyError + Send + Sync + 'static;

  /// Validate `draft` and persist it as a new, active claim.
  ///
  /// Returns a validation error listing every offending field; nothing is
  /// written in that case.
  fn create(
    &self,
    draft: ClaimDraft,
  ) -> impl Future<Output = Result<Claim, Self::Error>> + Send + '_;

  /// All claims, most recently created first.
  fn list(&self) -> impl Future<Output = Result<Vec<Claim>, Self::Error>> + Send + '_;

  /// Retrieve a claim by id. Returns `None` if not found.
  fn find(
    &self,
    id: ClaimId,
  ) -> impl Future<Output = Result<Option<Claim>, Self::Error>> + Send + '_;

  /// Mark a claim completed and return it.
  ///
  /// Completing an already completed claim succeeds without touching it.
  fn complete(
    &self,
    id: ClaimId,
  ) -> impl Future<Output = Result<Claim, Self::Error>> + Send + '_;

  /// Remove an active claim. Fails with a not-found error for unknown ids and
  /// an invalid-state error for completed claims.
  fn delete(
    &self,
    id: ClaimId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
