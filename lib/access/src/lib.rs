//! Access control for the atrium internal portal.
//!
//! This crate provides:
//! - Credential verification against an external store (`Authenticator`)
//! - Per-client session lifecycle (`SessionState`)
//! - Role-gated page visibility (`visible_pages`)
//! - The sign-in/sign-out boundary consumed by the presentation layer
//!   (`PortalAccess`, `SignInOutcome`)
//!
//! # Access Control Model
//!
//! Identities live in an external credential store together with a
//! role-to-permission mapping. Authentication resolves a submitted
//! email/secret pair into an [`AuthorizedIdentity`] carrying the caller's
//! role and permission flags; that snapshot populates the session and
//! drives page visibility for the rest of the session's lifetime.
//!
//! # Example
//!
//! ```
//! use atrium_access::{AuthorizedIdentity, Permissions, SessionState, visible_pages};
//!
//! let identity = AuthorizedIdentity {
//!     email: "jane.doe@corp.com".to_string(),
//!     full_name: "Jane Doe".to_string(),
//!     role_name: "super_admin".to_string(),
//!     permissions: Permissions {
//!         can_edit_users: true,
//!     },
//! };
//!
//! let mut session = SessionState::new();
//! assert!(!session.is_authenticated());
//!
//! session.start_session(identity);
//! assert!(session.is_authenticated());
//!
//! // Administrative pages become visible alongside the default page.
//! let pages = visible_pages(&session);
//! assert!(pages.len() > 1);
//! ```

pub mod authenticator;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod portal;
pub mod role;
pub mod session;
pub mod store;

// Re-export main types at crate root
pub use authenticator::{Authenticator, normalize_identity_key};
pub use error::{AuthError, StoreError};
pub use identity::AuthorizedIdentity;
pub use navigation::{Page, PageDescriptor, visible_pages};
pub use portal::{PortalAccess, SignInOutcome};
pub use role::Permissions;
pub use session::SessionState;
pub use store::{CredentialRecord, CredentialStore};
