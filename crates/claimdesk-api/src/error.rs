//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{FormRejection, JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use claimdesk_core::{ClassifyError, ErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every variant renders as a JSON body with a human-readable `message`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The submitted claim was rejected; the payload is the cause.
  #[error("invalid claim data: {0}")]
  Validation(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Translate a store failure according to its [`ErrorKind`].
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + ClassifyError + Send + Sync + 'static,
  {
    match e.kind() {
      ErrorKind::Validation => Self::Validation(e.to_string()),
      ErrorKind::NotFound => Self::NotFound(e.to_string()),
      ErrorKind::InvalidState => Self::BadRequest(e.to_string()),
      ErrorKind::Unavailable => Self::Store(Box::new(e)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Validation(rejection.body_text())
  }
}

impl From<FormRejection> for ApiError {
  fn from(rejection: FormRejection) -> Self {
    Self::Validation(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Validation(cause) => (
        StatusCode::BAD_REQUEST,
        json!({ "message": "invalid claim data", "error": cause }),
      ),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "message": m })),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "message": m })),
      ApiError::Store(e) => {
        // The cause stays in the log; clients get a generic message.
        tracing::error!(error = %e, "claim store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "message": "internal server error" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
