//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order equals chronological order.
//! Dates are stored as `YYYY-MM-DD`. Enumerations use their wire spelling.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound as _, Utc};
use claimdesk_core::claim::{BehaviourType, Claim, ClaimId, Email, Relationship};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time at the precision the database keeps, so a freshly built
/// [`Claim`] compares equal to the same claim read back.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn decode_relationship(s: &str) -> Result<Relationship> {
  Relationship::parse(s).ok_or_else(|| Error::Corrupt {
    column: "relationship",
    value:  s.to_owned(),
  })
}

pub fn decode_behaviour_type(s: &str) -> Result<BehaviourType> {
  BehaviourType::parse(s).ok_or_else(|| Error::Corrupt {
    column: "behaviour_type",
    value:  s.to_owned(),
  })
}

pub fn decode_email(s: String) -> Result<Email> {
  Email::try_from(s).map_err(|e| Error::Corrupt {
    column: "email",
    value:  e.0,
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawClaim::from_row`], in order.
pub const CLAIM_COLUMNS: &str = "id, email, relationship, behaviour_type, \
                                 details, breach_date, active, created_at, \
                                 updated_at";

/// Raw values read directly from a `claims` row.
pub struct RawClaim {
  pub id:             ClaimId,
  pub email:          Option<String>,
  pub relationship:   String,
  pub behaviour_type: String,
  pub details:        String,
  pub breach_date:    String,
  pub active:         bool,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawClaim {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      email:          row.get(1)?,
      relationship:   row.get(2)?,
      behaviour_type: row.get(3)?,
      details:        row.get(4)?,
      breach_date:    row.get(5)?,
      active:         row.get(6)?,
      created_at:     row.get(7)?,
      updated_at:     row.get(8)?,
    })
  }

  pub fn into_claim(self) -> Result<Claim> {
    Ok(Claim {
      id:             self.id,
      email:          self.email.map(decode_email).transpose()?,
      relationship:   decode_relationship(&self.relationship)?,
      behaviour_type: decode_behaviour_type(&self.behaviour_type)?,
      details:        self.details,
      breach_date:    decode_date(&self.breach_date)?,
      active:         self.active,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}
