//! Core types and trait definitions for Claim Desk.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod claim;
pub mod error;
pub mod store;

pub use error::{ClassifyError, Error, ErrorKind, ValidationError};
