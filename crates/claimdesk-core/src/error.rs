//! Error types for `claimdesk-core`.

use std::fmt;

use thiserror::Error;

use crate::claim::ClaimId;

// ─── Validation ──────────────────────────────────────────────────────────────

/// A single rejected field of a claim submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  /// The JSON key of the offending field, e.g. `"breachDate"`.
  pub field:   &'static str,
  pub message: String,
}

/// Every problem found while validating a
/// [`ClaimDraft`](crate::claim::ClaimDraft). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
  pub fields: Vec<FieldError>,
}

impl ValidationError {
  pub fn has_field(&self, field: &str) -> bool {
    self.fields.iter().any(|f| f.field == field)
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("invalid claim: ")?;
    for (i, field) in self.fields.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{} {}", field.field, field.message)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationError {}

// ─── Domain errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("claim not found: {0}")]
  NotFound(ClaimId),

  #[error("cannot delete a completed claim")]
  CompletedClaim(ClaimId),
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Coarse failure category shared by every store backend. Outer layers pick a
/// response from this without knowing the concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Malformed or missing input.
  Validation,
  /// The referenced claim does not exist.
  NotFound,
  /// The operation is not allowed in the claim's current state.
  InvalidState,
  /// The persistence layer failed.
  Unavailable,
}

/// Implemented by store error types so callers can classify failures.
pub trait ClassifyError {
  fn kind(&self) -> ErrorKind;
}

impl ClassifyError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) => ErrorKind::Validation,
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::CompletedClaim(_) => ErrorKind::InvalidState,
    }
  }
}
