//! Error type for `claimdesk-store-sqlite`.

use claimdesk_core::{ClassifyError, ErrorKind, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Claim(#[from] claimdesk_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column holds a value the domain types can't represent.
  #[error("unexpected {column} value in database: {value:?}")]
  Corrupt {
    column: &'static str,
    value:  String,
  },
}

impl From<ValidationError> for Error {
  fn from(e: ValidationError) -> Self { Self::Claim(e.into()) }
}

impl ClassifyError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Claim(e) => e.kind(),
      Self::Database(_) | Self::DateParse(_) | Self::Corrupt { .. } => {
        ErrorKind::Unavailable
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
