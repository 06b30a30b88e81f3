//! SQL schema for the Claim Desk SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted claims from being handed out again.
CREATE TABLE IF NOT EXISTS claims (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    email          TEXT,
    relationship   TEXT    NOT NULL
                   CHECK (relationship IN ('Internal', 'External')),
    behaviour_type TEXT    NOT NULL
                   CHECK (behaviour_type IN ('Procurement', 'Transport safety', 'Financial')),
    details        TEXT    NOT NULL CHECK (length(trim(details)) > 0),
    breach_date    TEXT    NOT NULL,   -- YYYY-MM-DD
    active         INTEGER NOT NULL DEFAULT 1 CHECK (active IN (0, 1)),
    created_at     TEXT    NOT NULL,   -- RFC 3339 UTC, microseconds; server-assigned
    updated_at     TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS claims_created_idx ON claims(created_at);

PRAGMA user_version = 1;
";
