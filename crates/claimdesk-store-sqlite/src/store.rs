//! [`SqliteStore`]: the SQLite implementation of [`ClaimStore`].

use std::path::Path;

use claimdesk_core::{
  claim::{Claim, ClaimDraft, ClaimId},
  store::ClaimStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  encode::{CLAIM_COLUMNS, RawClaim, encode_date, encode_dt, now},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A claim store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ClaimStore impl ─────────────────────────────────────────────────────────

impl ClaimStore for SqliteStore {
  type Error = Error;

  async fn create(&self, draft: ClaimDraft) -> Result<Claim> {
    let input = draft.validate()?;
    let at    = now();

    let email_str    = input.email.as_ref().map(|e| e.as_str().to_owned());
    let rel_str      = input.relationship.as_str();
    let kind_str     = input.behaviour_type.as_str();
    let details      = input.details.clone();
    let breach_str   = encode_date(input.breach_date);
    let at_str       = encode_dt(at);

    let id: ClaimId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO claims (
             email, relationship, behaviour_type, details, breach_date,
             active, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
          rusqlite::params![email_str, rel_str, kind_str, details, breach_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::info!(
      claim_id = id,
      relationship = rel_str,
      behaviour_type = kind_str,
      "claim created"
    );

    Ok(Claim {
      id,
      email:          input.email,
      relationship:   input.relationship,
      behaviour_type: input.behaviour_type,
      details:        input.details,
      breach_date:    input.breach_date,
      active:         true,
      created_at:     at,
      updated_at:     at,
    })
  }

  async fn list(&self) -> Result<Vec<Claim>> {
    let raws: Vec<RawClaim> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CLAIM_COLUMNS} FROM claims ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawClaim::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClaim::into_claim).collect()
  }

  async fn find(&self, id: ClaimId) -> Result<Option<Claim>> {
    let raw: Option<RawClaim> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?1"),
            rusqlite::params![id],
            RawClaim::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawClaim::into_claim).transpose()
  }

  async fn complete(&self, id: ClaimId) -> Result<Claim> {
    let at_str = encode_dt(now());

    // The `active = 1` guard makes re-completion a no-op that leaves
    // `updated_at` alone.
    let (changed, raw): (usize, Option<RawClaim>) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE claims SET active = 0, updated_at = ?2 WHERE id = ?1 AND active = 1",
          rusqlite::params![id, at_str],
        )?;
        let raw = tx
          .query_row(
            &format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?1"),
            rusqlite::params![id],
            RawClaim::from_row,
          )
          .optional()?;
        tx.commit()?;
        Ok((changed, raw))
      })
      .await?;

    let claim = raw
      .ok_or(claimdesk_core::Error::NotFound(id))?
      .into_claim()?;

    if changed > 0 {
      tracing::info!(claim_id = id, "claim completed");
    } else {
      tracing::debug!(claim_id = id, "claim was already completed");
    }

    Ok(claim)
  }

  async fn delete(&self, id: ClaimId) -> Result<()> {
    // `None` if the claim is missing, otherwise its `active` flag.
    let active: Option<bool> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let active: Option<bool> = tx
          .query_row(
            "SELECT active FROM claims WHERE id = ?1",
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?;
        if active == Some(true) {
          tx.execute("DELETE FROM claims WHERE id = ?1", rusqlite::params![id])?;
        }
        tx.commit()?;
        Ok(active)
      })
      .await?;

    match active {
      None => Err(claimdesk_core::Error::NotFound(id).into()),
      Some(false) => Err(claimdesk_core::Error::CompletedClaim(id).into()),
      Some(true) => {
        tracing::info!(claim_id = id, "claim deleted");
        Ok(())
      }
    }
  }
}
