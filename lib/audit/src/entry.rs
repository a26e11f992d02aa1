//! Audit entry and record types.
//!
//! An [`AuditEntry`] is what a mutating operation submits for writing; an
//! [`AuditRecord`] is what the store hands back, with its server-assigned
//! timestamp and id. Entries are append-only: nothing in this crate can
//! update or delete one.

use crate::host::HostIdentity;
use atrium_core::AuditEntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The administrative action vocabulary.
///
/// Serialized in the warehouse's SCREAMING_SNAKE_CASE convention
/// (`CREATE_USER`, `RUN_ETL`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// A new identity was provisioned.
    CreateUser,
    /// An identity's fields were edited.
    UpdateUser,
    /// An identity was deactivated (soft delete).
    DeactivateUser,
    /// A role assignment was created for an identity.
    AssignRole,
    /// An ad-hoc SQL statement was executed from the console.
    ExecuteSql,
    /// An ETL run was triggered from the console.
    RunEtl,
}

impl ActionType {
    /// Returns the warehouse string form of this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "CREATE_USER",
            Self::UpdateUser => "UPDATE_USER",
            Self::DeactivateUser => "DEACTIVATE_USER",
            Self::AssignRole => "ASSIGN_ROLE",
            Self::ExecuteSql => "EXECUTE_SQL",
            Self::RunEtl => "RUN_ETL",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an action type from its string form fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionTypeError {
    /// The string that failed to parse.
    pub value: String,
}

impl fmt::Display for ParseActionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown audit action type: {}", self.value)
    }
}

impl std::error::Error for ParseActionTypeError {}

impl std::str::FromStr for ActionType {
    type Err = ParseActionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE_USER" => Ok(Self::CreateUser),
            "UPDATE_USER" => Ok(Self::UpdateUser),
            "DEACTIVATE_USER" => Ok(Self::DeactivateUser),
            "ASSIGN_ROLE" => Ok(Self::AssignRole),
            "EXECUTE_SQL" => Ok(Self::ExecuteSql),
            "RUN_ETL" => Ok(Self::RunEtl),
            other => Err(ParseActionTypeError {
                value: other.to_string(),
            }),
        }
    }
}

/// An audit entry as submitted for writing.
///
/// Carries no timestamp: the store assigns one at append time so clock
/// skew between portal hosts cannot reorder the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// What kind of action was performed.
    pub action_type: ActionType,
    /// Free-text details of the action.
    pub details: String,
    /// Email of the administrator who performed the action.
    pub actor_email: String,
    /// Identity of the host the action originated from.
    pub host: HostIdentity,
}

impl AuditEntry {
    /// Creates an entry attributed to the current host.
    #[must_use]
    pub fn new(
        action_type: ActionType,
        details: impl Into<String>,
        actor_email: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            details: details.into(),
            actor_email: actor_email.into(),
            host: HostIdentity::detect(),
        }
    }

    /// Replaces the host attribution.
    #[must_use]
    pub fn with_host(mut self, host: HostIdentity) -> Self {
        self.host = host;
        self
    }
}

/// A stored audit record, as read back from the audit store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique id of the stored record.
    pub id: AuditEntryId,
    /// What kind of action was performed.
    pub action_type: ActionType,
    /// Free-text details of the action.
    pub details: String,
    /// Email of the administrator who performed the action.
    pub actor_email: String,
    /// Identity of the host the action originated from.
    pub host: HostIdentity,
    /// Server-assigned append timestamp.
    pub recorded_at: DateTime<Utc>,
}
