//! The credential store seam.
//!
//! The portal never owns identity data; it queries an external relational
//! store through this trait. The warehouse-backed implementation lives in
//! the atrium-directory crate; tests use an in-memory fake.

use crate::error::StoreError;
use crate::identity::AuthorizedIdentity;
use async_trait::async_trait;
use atrium_core::UserId;
use rootcause::prelude::Report;

/// The credential half of a stored identity, as returned by the
/// active-identity lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// The identity's stable id, used for the follow-up role lookup.
    pub user_id: UserId,
    /// Stored comparison value for the secret. Opaque to this crate;
    /// hardening of the stored form is the store's concern.
    pub secret: String,
}

/// Read surface of the external credential store.
///
/// Implementations must treat inactive identities as absent in
/// `find_active_by_email`: the Authenticator relies on that to keep
/// inactive and nonexistent identities indistinguishable to callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Looks up an active identity by its normalized email.
    ///
    /// The caller normalizes the key (trim + lowercase) before the call;
    /// implementations match it against the stored email under the same
    /// normalization.
    async fn find_active_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<CredentialRecord>, Report<StoreError>>;

    /// Resolves the identity's role assignment and permission flags.
    ///
    /// Returns `None` when the identity has no role assignment row, which
    /// the Authenticator reports as a distinct condition.
    async fn resolve_authorized_identity(
        &self,
        user_id: UserId,
    ) -> Result<Option<AuthorizedIdentity>, Report<StoreError>>;
}
