//! Per-client session state.
//!
//! A session is a process-local record owned by a single browser/client
//! connection. It is created empty, populated by a successful
//! authentication in the current process lifetime, and cleared on
//! sign-out. It is never persisted or restored from storage, so an
//! authenticated session always means the Authenticator ran successfully
//! in this process.

use crate::identity::AuthorizedIdentity;

/// Process-local authentication state for one client session.
///
/// The authenticated flag and the identity snapshot are a single value:
/// the session is authenticated exactly when a snapshot is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<AuthorizedIdentity>,
}

impl SessionState {
    /// Creates a new, unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session authenticated with the given identity snapshot.
    ///
    /// Idempotent: calling this on an already-authenticated session simply
    /// replaces the snapshot.
    pub fn start_session(&mut self, identity: AuthorizedIdentity) {
        self.identity = Some(identity);
    }

    /// Clears the session back to its initial empty state.
    pub fn end_session(&mut self) {
        self.identity = None;
    }

    /// Returns true if a successful authentication populated this session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the identity snapshot, if the session is authenticated.
    #[must_use]
    pub fn current_identity(&self) -> Option<&AuthorizedIdentity> {
        self.identity.as_ref()
    }

    /// Returns true if the session's identity may administer users.
    ///
    /// Unauthenticated sessions hold no permissions.
    #[must_use]
    pub fn can_edit_users(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(AuthorizedIdentity::can_edit_users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Permissions;

    fn test_identity() -> AuthorizedIdentity {
        AuthorizedIdentity {
            email: "jane.doe@corp.com".to_string(),
            full_name: "Jane Doe".to_string(),
            role_name: "super_admin".to_string(),
            permissions: Permissions::user_admin(),
        }
    }

    #[test]
    fn new_session_is_unauthenticated() {
        let session = SessionState::new();
        assert!(!session.is_authenticated());
        assert!(session.current_identity().is_none());
        assert!(!session.can_edit_users());
    }

    #[test]
    fn start_session_populates_snapshot() {
        let mut session = SessionState::new();
        session.start_session(test_identity());

        assert!(session.is_authenticated());
        assert_eq!(
            session.current_identity().map(|i| i.email.as_str()),
            Some("jane.doe@corp.com")
        );
        assert!(session.can_edit_users());
    }

    #[test]
    fn start_session_twice_replaces_snapshot() {
        let mut session = SessionState::new();
        session.start_session(test_identity());

        let mut other = test_identity();
        other.email = "other@corp.com".to_string();
        other.permissions = Permissions::none();
        session.start_session(other);

        assert!(session.is_authenticated());
        assert_eq!(
            session.current_identity().map(|i| i.email.as_str()),
            Some("other@corp.com")
        );
        assert!(!session.can_edit_users());
    }

    #[test]
    fn end_session_round_trips_to_initial_state() {
        let mut session = SessionState::new();
        session.start_session(test_identity());
        session.end_session();

        assert_eq!(session, SessionState::new());
        assert!(!session.is_authenticated());
        assert!(session.current_identity().is_none());
    }

    #[test]
    fn end_session_on_empty_session_is_a_no_op() {
        let mut session = SessionState::new();
        session.end_session();
        assert_eq!(session, SessionState::new());
    }
}
