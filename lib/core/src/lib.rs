//! Core domain types and utilities for the atrium internal portal.
//!
//! This crate provides the foundational types and error handling shared by
//! the access-control, audit, and directory crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{AuditEntryId, ParseIdError, UserId};
