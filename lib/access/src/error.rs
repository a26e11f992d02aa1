//! Error types for the access crate.
//!
//! `AuthError` is the authentication failure taxonomy surfaced to callers
//! as typed results; `StoreError` is what credential store implementations
//! return from their own seam, wrapped in a rootcause `Report`.

use atrium_core::UserId;
use std::fmt;

/// Errors from an authentication attempt.
///
/// The first three variants are caller-correctable outcomes; only
/// `StoreUnavailable` signals a system-health problem. `NotFound` and
/// `BadCredential` must be rendered identically by UI layers (a single
/// generic invalid-credentials message) while `NoRoleAssigned` gets its
/// own contact-administrator message. That asymmetry is the contract,
/// not an oversight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No active identity matched the normalized key. Inactive identities
    /// produce this same variant so callers cannot enumerate accounts.
    NotFound,
    /// The identity exists but the supplied secret did not match.
    BadCredential,
    /// Credentials are valid but the identity has no role assignment.
    NoRoleAssigned {
        /// The identity that lacks a role mapping.
        user_id: UserId,
    },
    /// The credential store could not be reached or failed mid-lookup.
    StoreUnavailable {
        /// Error details from the store.
        details: String,
    },
}

impl AuthError {
    /// Returns true if the failure warrants operator attention rather
    /// than a corrected credential from the user.
    #[must_use]
    pub fn is_system_failure(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => {
                write!(f, "no active identity matched the supplied key")
            }
            Self::BadCredential => {
                write!(f, "supplied secret did not match the stored credential")
            }
            Self::NoRoleAssigned { user_id } => {
                write!(f, "identity {user_id} has no role assignment")
            }
            Self::StoreUnavailable { details } => {
                write!(f, "credential store unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors returned by credential store implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or the query failed.
    Unavailable {
        /// Error details.
        details: String,
    },
    /// A row came back but could not be decoded into a domain type.
    Decode {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "credential store unavailable: {details}")
            }
            Self::Decode { details } => {
                write!(f, "failed to decode credential store row: {details}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
