//! Handlers for `/claims` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/claims` | Newest first |
//! | `POST`   | `/claims` | Body: [`ClaimDraft`] as JSON or a urlencoded form; returns 201 + stored claim |
//! | `GET`    | `/claims/{id}` | 404 if not found |
//! | `PUT`    | `/claims/{id}/complete` | Returns the updated claim |
//! | `DELETE` | `/claims/{id}` | 204; 400 if the claim is completed |

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::{FromRequest, Path, Request, State, rejection::PathRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use claimdesk_core::{
  claim::{Claim, ClaimDraft, ClaimId},
  store::ClaimStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /claims`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Claim>>, ApiError>
where
  S: ClaimStore,
{
  let claims = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(claims))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// A [`ClaimDraft`] read from a urlencoded form body when the request says
/// so, and from JSON otherwise.
///
/// Unreadable bodies are rejected with the same 400 shape as field
/// validation failures.
#[derive(Debug)]
pub struct ClaimSubmission(pub ClaimDraft);

impl<S> FromRequest<S> for ClaimSubmission
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_form = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| {
        ct.to_ascii_lowercase()
          .starts_with("application/x-www-form-urlencoded")
      });

    if is_form {
      let Form(draft) = Form::<ClaimDraft>::from_request(req, state).await?;
      Ok(Self(draft))
    } else {
      let Json(draft) = Json::<ClaimDraft>::from_request(req, state).await?;
      Ok(Self(draft))
    }
  }
}

/// `POST /claims`: returns 201 + the stored [`Claim`].
///
/// Field validation happens in the store.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ClaimSubmission(draft): ClaimSubmission,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClaimStore,
{
  let claim = store.create(draft).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(claim)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /claims/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<ClaimId>, PathRejection>,
) -> Result<Json<Claim>, ApiError>
where
  S: ClaimStore,
{
  let Path(id) = id?;
  let claim = store
    .find(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("claim not found: {id}")))?;
  Ok(Json(claim))
}

// ─── Complete ─────────────────────────────────────────────────────────────────

/// `PUT /claims/{id}/complete`
pub async fn complete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<ClaimId>, PathRejection>,
) -> Result<Json<Claim>, ApiError>
where
  S: ClaimStore,
{
  let Path(id) = id?;
  let claim = store.complete(id).await.map_err(ApiError::from_store)?;
  Ok(Json(claim))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /claims/{id}`: 204 with an empty body.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<ClaimId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ClaimStore,
{
  let Path(id) = id?;
  store.delete(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
