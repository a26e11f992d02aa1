//! Audit trail boundary for the atrium portal.
//!
//! Every administrative mutation writes an append-only audit entry through
//! the [`AuditRecorder`] trait. Writes are best-effort by policy: an audit
//! infrastructure outage must never block the administrative action that
//! triggered it. Failed writes are surfaced to the operational log via
//! `tracing` rather than silently dropped; see [`record_best_effort`].

pub mod entry;
pub mod error;
pub mod host;
pub mod recorder;

// Re-export main types at crate root
pub use entry::{ActionType, AuditEntry, AuditRecord, ParseActionTypeError};
pub use error::AuditError;
pub use host::HostIdentity;
pub use recorder::{AuditRecorder, record_best_effort};
