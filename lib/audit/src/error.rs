//! Error types for the audit crate.

use std::fmt;

/// Errors from audit trail operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// Appending an entry to the audit store failed.
    ///
    /// Always non-fatal to the triggering administrative action; callers
    /// go through [`record_best_effort`](crate::record_best_effort), which
    /// logs and swallows this.
    WriteFailed {
        /// Error details.
        details: String,
    },
    /// Reading back audit records failed.
    ReadFailed {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed { details } => {
                write!(f, "failed to append audit entry: {details}")
            }
            Self::ReadFailed { details } => {
                write!(f, "failed to read audit records: {details}")
            }
        }
    }
}

impl std::error::Error for AuditError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failed_display() {
        let err = AuditError::WriteFailed {
            details: "connection reset".to_string(),
        };
        assert!(err.to_string().contains("append audit entry"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn read_failed_display() {
        let err = AuditError::ReadFailed {
            details: "timeout".to_string(),
        };
        assert!(err.to_string().contains("read audit records"));
    }
}
