//! The resolved identity snapshot produced by authentication.

use crate::role::Permissions;
use serde::{Deserialize, Serialize};

/// An identity that passed credential checks and role resolution.
///
/// This is the snapshot stored in [`SessionState`](crate::SessionState)
/// for the lifetime of a sign-in. It deliberately carries no secret and
/// no active flag: both were verified at authentication time and are not
/// re-checked against the store afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedIdentity {
    /// Stored email, as held by the credential store.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Name of the single role assigned to this identity.
    pub role_name: String,
    /// Permission flags granted by the role.
    pub permissions: Permissions,
}

impl AuthorizedIdentity {
    /// Returns true if this identity may administer users.
    #[must_use]
    pub fn can_edit_users(&self) -> bool {
        self.permissions.can_edit_users
    }
}
