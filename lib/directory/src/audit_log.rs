//! Postgres implementation of the audit store.
//!
//! Appends are parameterized inserts with a server-assigned timestamp
//! (`now()` evaluated by the database, not the portal host). The table is
//! append-only; nothing here updates or deletes records.

use async_trait::async_trait;
use atrium_audit::{ActionType, AuditEntry, AuditError, AuditRecord, AuditRecorder, HostIdentity};
use atrium_core::AuditEntryId;
use chrono::{DateTime, Utc};
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use tracing::instrument;

/// Row type for audit record reads.
#[derive(FromRow)]
struct AuditRow {
    id: String,
    action_type: String,
    details: String,
    actor_email: String,
    host_ip: String,
    host_name: String,
    recorded_at: DateTime<Utc>,
}

impl AuditRow {
    fn try_into_record(self) -> Result<AuditRecord, AuditError> {
        let id = AuditEntryId::from_str(&self.id).map_err(|e| AuditError::ReadFailed {
            details: format!("invalid audit entry id '{}': {}", self.id, e),
        })?;
        let action_type =
            ActionType::from_str(&self.action_type).map_err(|e| AuditError::ReadFailed {
                details: e.to_string(),
            })?;
        Ok(AuditRecord {
            id,
            action_type,
            details: self.details,
            actor_email: self.actor_email,
            host: HostIdentity::new(self.host_ip, self.host_name),
            recorded_at: self.recorded_at,
        })
    }
}

/// Audit store backed by the warehouse's audit log table.
pub struct WarehouseAuditRecorder {
    pool: PgPool,
}

impl WarehouseAuditRecorder {
    /// Creates a recorder over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reads the newest `limit` audit records, newest first.
    ///
    /// Backs the audit log viewer page.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: i64) -> Result<Vec<AuditRecord>, Report<AuditError>> {
        let rows: Vec<AuditRow> = sqlx::query_as(
            r#"
            SELECT id, action_type, details, actor_email, host_ip, host_name, recorded_at
            FROM audit_logs
            ORDER BY recorded_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuditError::ReadFailed {
            details: e.to_string(),
        })?;

        rows.into_iter()
            .map(|r| r.try_into_record().map_err(Report::from))
            .collect()
    }
}

#[async_trait]
impl AuditRecorder for WarehouseAuditRecorder {
    #[instrument(skip(self, entry), fields(action = %entry.action_type))]
    async fn record(&self, entry: &AuditEntry) -> Result<(), Report<AuditError>> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, action_type, details, actor_email, host_ip, host_name, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            "#,
        )
        .bind(AuditEntryId::new().to_string())
        .bind(entry.action_type.as_str())
        .bind(&entry.details)
        .bind(&entry.actor_email)
        .bind(&entry.host.ip)
        .bind(&entry.host.name)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditError::WriteFailed {
            details: e.to_string(),
        })?;

        Ok(())
    }
}
