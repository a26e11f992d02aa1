//! Permission flags for portal access control.
//!
//! Roles live in the credential store as static reference data: a named
//! bundle of permission flags assigned to zero or more identities. This
//! core never mutates them; role resolution reads the flags into a
//! `Permissions` value carried on the session's identity snapshot.

use serde::{Deserialize, Serialize};

/// Permission flags carried by a role.
///
/// Flags default to false when absent so older role rows deserialize
/// without every column present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Grants the administrative page set: user management, user creation,
    /// the audit log viewer, and the SQL/ETL consoles.
    #[serde(default)]
    pub can_edit_users: bool,
}

impl Permissions {
    /// Permissions with no flags set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Permissions with the user-administration flag set.
    #[must_use]
    pub fn user_admin() -> Self {
        Self {
            can_edit_users: true,
        }
    }
}
