//! The audit recorder trait and the best-effort write policy.

use crate::entry::AuditEntry;
use crate::error::AuditError;
use async_trait::async_trait;
use rootcause::prelude::Report;
use tracing::warn;

/// Append-only write surface of the audit store.
///
/// Implementations append the entry with a server-assigned timestamp and
/// never update or delete existing records.
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    /// Appends one entry to the audit trail.
    async fn record(&self, entry: &AuditEntry) -> Result<(), Report<AuditError>>;
}

/// Records an entry, swallowing any write failure.
///
/// Audit outages must never block the administrative action that
/// triggered the write, so failures are reported to the operational log
/// and discarded. Callers that need the failure itself should call
/// [`AuditRecorder::record`] directly.
pub async fn record_best_effort<R>(recorder: &R, entry: AuditEntry)
where
    R: AuditRecorder + ?Sized,
{
    if let Err(report) = recorder.record(&entry).await {
        warn!(
            action = %entry.action_type,
            actor = %entry.actor_email,
            error = %report,
            "audit write failed; continuing without it"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ActionType;
    use std::sync::Mutex;

    /// Collects entries, optionally failing every write.
    #[derive(Default)]
    struct MemoryRecorder {
        entries: Mutex<Vec<AuditEntry>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl AuditRecorder for MemoryRecorder {
        async fn record(&self, entry: &AuditEntry) -> Result<(), Report<AuditError>> {
            if self.fail_writes {
                return Err(AuditError::WriteFailed {
                    details: "audit store offline".to_string(),
                }
                .into());
            }
            self.entries
                .lock()
                .expect("recorder mutex poisoned")
                .push(entry.clone());
            Ok(())
        }
    }

    fn test_entry() -> AuditEntry {
        AuditEntry::new(
            ActionType::CreateUser,
            "Provisioned: new.user@corp.com",
            "jane.doe@corp.com",
        )
    }

    #[tokio::test]
    async fn record_appends_the_entry() {
        let recorder = MemoryRecorder::default();
        recorder.record(&test_entry()).await.expect("should record");

        let entries = recorder.entries.lock().expect("lock");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action_type, ActionType::CreateUser);
    }

    #[tokio::test]
    async fn best_effort_succeeds_quietly() {
        let recorder = MemoryRecorder::default();
        record_best_effort(&recorder, test_entry()).await;

        assert_eq!(recorder.entries.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn best_effort_swallows_write_failures() {
        let recorder = MemoryRecorder {
            fail_writes: true,
            ..Default::default()
        };

        // Must return normally despite the failing store.
        record_best_effort(&recorder, test_entry()).await;

        assert!(recorder.entries.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn best_effort_works_through_a_trait_object() {
        let recorder = MemoryRecorder::default();
        let as_dyn: &dyn AuditRecorder = &recorder;
        record_best_effort(as_dyn, test_entry()).await;

        assert_eq!(recorder.entries.lock().expect("lock").len(), 1);
    }
}
