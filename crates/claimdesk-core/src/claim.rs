//! Claim types: the single resource managed by Claim Desk.
//!
//! A claim enters the system as an unvalidated [`ClaimDraft`], becomes a
//! [`NewClaim`] once every field has been checked, and is persisted as a
//! [`Claim`] with a store-assigned id and timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail as _;

use crate::error::{FieldError, ValidationError};

/// Store-assigned, monotonically increasing claim identifier.
pub type ClaimId = i64;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Whether the reporter is inside or outside the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
  Internal,
  External,
}

impl Relationship {
  pub const ALL: [Self; 2] = [Self::Internal, Self::External];

  /// The wire and column spelling.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Internal => "Internal",
      Self::External => "External",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|r| r.as_str() == s)
  }
}

/// The category of behaviour being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviourType {
  Procurement,
  #[serde(rename = "Transport safety")]
  TransportSafety,
  Financial,
}

impl BehaviourType {
  pub const ALL: [Self; 3] =
    [Self::Procurement, Self::TransportSafety, Self::Financial];

  /// The wire and column spelling. Must match the serde renames above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Procurement => "Procurement",
      Self::TransportSafety => "Transport safety",
      Self::Financial => "Financial",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|b| b.as_str() == s)
  }
}

// ─── Email ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("not a valid email address: {0:?}")]
pub struct InvalidEmail(pub String);

/// A syntactically valid email address. Surrounding whitespace is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for Email {
  type Error = InvalidEmail;

  fn try_from(raw: String) -> Result<Self, Self::Error> {
    let trimmed = raw.trim().to_owned();
    if trimmed.validate_email() {
      Ok(Self(trimmed))
    } else {
      Err(InvalidEmail(raw))
    }
  }
}

impl From<Email> for String {
  fn from(email: Email) -> Self { email.0 }
}

// ─── Claim ───────────────────────────────────────────────────────────────────

/// A persisted claim, serialised with the camelCase keys of the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
  pub id:             ClaimId,
  pub email:          Option<Email>,
  pub relationship:   Relationship,
  pub behaviour_type: BehaviourType,
  pub details:        String,
  pub breach_date:    NaiveDate,
  /// `true` until the claim is completed; never goes back to `true`.
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl Claim {
  pub fn is_completed(&self) -> bool { !self.active }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// An unvalidated claim submission exactly as a client sent it.
///
/// Every field is optional so that a missing value surfaces as a field-level
/// [`ValidationError`] instead of a deserialisation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDraft {
  pub email:          Option<String>,
  pub relationship:   Option<String>,
  pub behaviour_type: Option<String>,
  pub details:        Option<String>,
  pub breach_date:    Option<String>,
}

impl ClaimDraft {
  /// Check every field, collecting all failures rather than stopping at the
  /// first one.
  pub fn validate(self) -> Result<NewClaim, ValidationError> {
    let mut errors = Vec::new();
    let mut reject = |field: &'static str, message: String| {
      errors.push(FieldError { field, message });
    };

    // HTML forms submit an empty string for an untouched optional input.
    let email = match self.email.as_deref().map(str::trim) {
      None | Some("") => None,
      Some(raw) => match Email::try_from(raw.to_owned()) {
        Ok(email) => Some(email),
        Err(_) => {
          reject("email", "is not a valid email address".to_owned());
          None
        }
      },
    };

    let relationship = match self.relationship.as_deref() {
      None => {
        reject("relationship", "is required".to_owned());
        None
      }
      Some(raw) => {
        let parsed = Relationship::parse(raw.trim());
        if parsed.is_none() {
          reject(
            "relationship",
            format!("must be one of Internal, External (got {raw:?})"),
          );
        }
        parsed
      }
    };

    let behaviour_type = match self.behaviour_type.as_deref() {
      None => {
        reject("behaviourType", "is required".to_owned());
        None
      }
      Some(raw) => {
        let parsed = BehaviourType::parse(raw.trim());
        if parsed.is_none() {
          reject(
            "behaviourType",
            format!(
              "must be one of Procurement, Transport safety, Financial (got \
               {raw:?})"
            ),
          );
        }
        parsed
      }
    };

    let details = match self.details {
      Some(d) if !d.trim().is_empty() => Some(d),
      Some(_) => {
        reject("details", "must not be empty".to_owned());
        None
      }
      None => {
        reject("details", "is required".to_owned());
        None
      }
    };

    let breach_date = match self.breach_date.as_deref().map(str::trim) {
      None | Some("") => {
        reject("breachDate", "is required".to_owned());
        None
      }
      Some(raw) => {
        let parsed = parse_date(raw);
        if parsed.is_none() {
          reject("breachDate", format!("is not a valid date (got {raw:?})"));
        }
        parsed
      }
    };

    match (relationship, behaviour_type, details, breach_date) {
      (Some(relationship), Some(behaviour_type), Some(details), Some(breach_date))
        if errors.is_empty() =>
      {
        Ok(NewClaim { email, relationship, behaviour_type, details, breach_date })
      }
      _ => Err(ValidationError { fields: errors }),
    }
  }
}

/// Accepts a calendar date (`2024-01-15`) or a full RFC 3339 timestamp, of
/// which only the date part is kept.
fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
    DateTime::parse_from_rfc3339(s)
      .ok()
      .map(|dt| dt.with_timezone(&Utc).date_naive())
  })
}

// ─── NewClaim ────────────────────────────────────────────────────────────────

/// A fully validated submission, ready to be persisted.
/// `id`, `active` and both timestamps are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
  pub email:          Option<Email>,
  pub relationship:   Relationship,
  pub behaviour_type: BehaviourType,
  pub details:        String,
  pub breach_date:    NaiveDate,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_draft() -> ClaimDraft {
    ClaimDraft {
      email:          None,
      relationship:   Some("Internal".into()),
      behaviour_type: Some("Financial".into()),
      details:        Some("desk drawer missing".into()),
      breach_date:    Some("2024-01-15".into()),
    }
  }

  #[test]
  fn valid_draft_without_email() {
    let claim = valid_draft().validate().unwrap();
    assert_eq!(claim.relationship, Relationship::Internal);
    assert_eq!(claim.behaviour_type, BehaviourType::Financial);
    assert_eq!(claim.breach_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert!(claim.email.is_none());
  }

  #[test]
  fn valid_email_is_kept_trimmed() {
    let mut draft = valid_draft();
    draft.email = Some("  reporter@example.com ".into());
    let claim = draft.validate().unwrap();
    assert_eq!(claim.email.unwrap().as_str(), "reporter@example.com");
  }

  #[test]
  fn empty_email_is_treated_as_absent() {
    let mut draft = valid_draft();
    draft.email = Some(String::new());
    assert!(draft.validate().unwrap().email.is_none());
  }

  #[test]
  fn malformed_email_is_rejected() {
    let mut draft = valid_draft();
    draft.email = Some("not-an-email".into());
    let err = draft.validate().unwrap_err();
    assert!(err.has_field("email"));
    assert_eq!(err.fields.len(), 1);
  }

  #[test]
  fn missing_relationship_is_rejected() {
    let mut draft = valid_draft();
    draft.relationship = None;
    assert!(draft.validate().unwrap_err().has_field("relationship"));
  }

  #[test]
  fn unknown_relationship_is_rejected() {
    let mut draft = valid_draft();
    draft.relationship = Some("Contractor".into());
    let err = draft.validate().unwrap_err();
    assert!(err.has_field("relationship"));
    assert!(err.to_string().contains("Contractor"), "{err}");
  }

  #[test]
  fn transport_safety_uses_spaced_spelling() {
    let mut draft = valid_draft();
    draft.behaviour_type = Some("Transport safety".into());
    assert_eq!(
      draft.validate().unwrap().behaviour_type,
      BehaviourType::TransportSafety
    );

    let mut draft = valid_draft();
    draft.behaviour_type = Some("TransportSafety".into());
    assert!(draft.validate().unwrap_err().has_field("behaviourType"));
  }

  #[test]
  fn missing_and_blank_details_are_rejected() {
    let mut draft = valid_draft();
    draft.details = None;
    assert!(draft.validate().unwrap_err().has_field("details"));

    let mut draft = valid_draft();
    draft.details = Some("   ".into());
    assert!(draft.validate().unwrap_err().has_field("details"));
  }

  #[test]
  fn missing_or_garbled_breach_date_is_rejected() {
    let mut draft = valid_draft();
    draft.breach_date = None;
    assert!(draft.validate().unwrap_err().has_field("breachDate"));

    let mut draft = valid_draft();
    draft.breach_date = Some("15/01/2024".into());
    assert!(draft.validate().unwrap_err().has_field("breachDate"));
  }

  #[test]
  fn rfc3339_breach_date_keeps_the_date() {
    let mut draft = valid_draft();
    draft.breach_date = Some("2024-01-15T10:30:00Z".into());
    assert_eq!(
      draft.validate().unwrap().breach_date,
      NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
  }

  #[test]
  fn every_offending_field_is_reported() {
    let err = ClaimDraft::default().validate().unwrap_err();
    for field in ["relationship", "behaviourType", "details", "breachDate"] {
      assert!(err.has_field(field), "missing {field} in {err}");
    }
    assert!(!err.has_field("email"));
  }

  #[test]
  fn draft_reads_camel_case_json() {
    let draft: ClaimDraft = serde_json::from_value(serde_json::json!({
      "relationship":  "External",
      "behaviourType": "Procurement",
      "details":       "invoice split to dodge approval",
      "breachDate":    "2023-11-02",
    }))
    .unwrap();
    let claim = draft.validate().unwrap();
    assert_eq!(claim.relationship, Relationship::External);
    assert_eq!(claim.behaviour_type, BehaviourType::Procurement);
  }

  #[test]
  fn email_deserialisation_rejects_garbage() {
    let bad: Result<Email, _> = serde_json::from_str("\"nope\"");
    assert!(bad.is_err());
    let good: Email = serde_json::from_str("\"a@example.org\"").unwrap();
    assert_eq!(good.as_str(), "a@example.org");
  }
}
