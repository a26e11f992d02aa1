//! The sign-in/sign-out boundary consumed by the presentation layer.
//!
//! `PortalAccess` ties the [`Authenticator`] to a caller-owned
//! [`SessionState`] and collapses the authentication error taxonomy into
//! the three message classes the UI is allowed to distinguish. `NotFound`
//! and `BadCredential` fold into one generic invalid-credentials outcome;
//! a missing role assignment and a store outage each keep their own.

use crate::authenticator::Authenticator;
use crate::error::AuthError;
use crate::session::SessionState;
use crate::store::CredentialStore;
use tracing::{info, warn};

/// Outcome of a sign-in attempt, shaped for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Credentials and role resolved; the session is now authenticated.
    Success,
    /// Unknown identity, inactive identity, or wrong secret. Deliberately
    /// one undifferentiated outcome so accounts cannot be enumerated.
    InvalidCredentials,
    /// Credentials were valid but no role is assigned. Rendered as a
    /// contact-administrator message, never as invalid credentials.
    NoRoleAssigned,
    /// The credential store could not be reached. An operator signal,
    /// not a try-again-with-other-credentials prompt.
    SystemUnavailable {
        /// Error details for the operational log.
        details: String,
    },
}

impl SignInOutcome {
    /// Returns true if the attempt authenticated the session.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Session boundary over an authenticator and a caller-owned session.
///
/// Each client connection owns its own [`SessionState`] and passes it by
/// mutable reference; there is no ambient global session.
pub struct PortalAccess<S> {
    authenticator: Authenticator<S>,
}

impl<S: CredentialStore> PortalAccess<S> {
    /// Creates the boundary over the given credential store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            authenticator: Authenticator::new(store),
        }
    }

    /// Returns the underlying authenticator.
    #[must_use]
    pub fn authenticator(&self) -> &Authenticator<S> {
        &self.authenticator
    }

    /// Attempts to sign the session in with the given credentials.
    ///
    /// On success the session snapshot is replaced; on any failure the
    /// session is left exactly as it was.
    pub async fn sign_in(
        &self,
        session: &mut SessionState,
        identity_key: &str,
        secret: &str,
    ) -> SignInOutcome {
        match self.authenticator.authenticate(identity_key, secret).await {
            Ok(identity) => {
                info!(email = %identity.email, role = %identity.role_name, "sign-in");
                session.start_session(identity);
                SignInOutcome::Success
            }
            Err(AuthError::NotFound | AuthError::BadCredential) => {
                SignInOutcome::InvalidCredentials
            }
            Err(AuthError::NoRoleAssigned { user_id }) => {
                info!(user_id = %user_id, "sign-in blocked: no role assignment");
                SignInOutcome::NoRoleAssigned
            }
            Err(AuthError::StoreUnavailable { details }) => {
                warn!(error = %details, "credential store unavailable during sign-in");
                SignInOutcome::SystemUnavailable { details }
            }
        }
    }

    /// Signs the session out, clearing its snapshot.
    pub fn sign_out(&self, session: &mut SessionState) {
        if let Some(identity) = session.current_identity() {
            info!(email = %identity.email, "sign-out");
        }
        session.end_session();
    }
}
