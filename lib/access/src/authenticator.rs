//! Credential verification and role resolution.

use crate::error::{AuthError, StoreError};
use crate::identity::AuthorizedIdentity;
use crate::store::CredentialStore;
use rootcause::prelude::Report;
use tracing::debug;

/// Normalizes a submitted identity key for matching against stored emails.
///
/// Matching is case- and surrounding-whitespace-insensitive, so two keys
/// differing only in those respects authenticate identically.
#[must_use]
pub fn normalize_identity_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validates identity/secret pairs against a [`CredentialStore`] and
/// resolves the caller's effective role.
///
/// Authentication is a two-stage read: an active-identity lookup by
/// normalized email, then a role resolution by the identity's id. The two
/// stages are not atomic; an identity deactivated between them still
/// resolves a role on this code path.
pub struct Authenticator<S> {
    store: S,
}

impl<S: CredentialStore> Authenticator<S> {
    /// Creates an authenticator over the given credential store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying credential store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Authenticates an identity key and secret.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] when no active identity matches the
    ///   normalized key. Inactive identities produce this same error so
    ///   callers cannot distinguish them from missing ones.
    /// - [`AuthError::BadCredential`] when the key matches but the secret
    ///   (both sides trimmed) does not.
    /// - [`AuthError::NoRoleAssigned`] when credentials are valid but the
    ///   identity has no role mapping. UI layers must render this as a
    ///   contact-administrator message, not as invalid credentials.
    /// - [`AuthError::StoreUnavailable`] when either store lookup fails.
    ///
    /// Writes no audit entry: login attempts are not administrative
    /// actions in this design.
    pub async fn authenticate(
        &self,
        identity_key: &str,
        secret: &str,
    ) -> Result<AuthorizedIdentity, AuthError> {
        let key = normalize_identity_key(identity_key);

        let record = self
            .store
            .find_active_by_email(&key)
            .await
            .map_err(store_unavailable)?;

        let Some(record) = record else {
            debug!(key = %key, "no active identity for key");
            return Err(AuthError::NotFound);
        };

        if record.secret.trim() != secret.trim() {
            debug!(key = %key, "secret mismatch");
            return Err(AuthError::BadCredential);
        }

        let identity = self
            .store
            .resolve_authorized_identity(record.user_id)
            .await
            .map_err(store_unavailable)?;

        match identity {
            Some(identity) => {
                debug!(
                    email = %identity.email,
                    role = %identity.role_name,
                    "authentication succeeded"
                );
                Ok(identity)
            }
            None => {
                debug!(user_id = %record.user_id, "identity has no role assignment");
                Err(AuthError::NoRoleAssigned {
                    user_id: record.user_id,
                })
            }
        }
    }
}

fn store_unavailable(report: Report<StoreError>) -> AuthError {
    AuthError::StoreUnavailable {
        details: report.to_string(),
    }
}
