//! Error types for administrative directory operations.

use atrium_core::UserId;
use std::fmt;

/// Errors from administrative user operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// No identity exists with the given id.
    NotFound {
        /// The identity that was targeted.
        user_id: UserId,
    },
    /// An identity with this email already exists.
    DuplicateEmail {
        /// The conflicting email.
        email: String,
    },
    /// The role named in a provisioning request does not exist.
    UnknownRole {
        /// The role that was requested.
        role_name: String,
    },
    /// The database rejected or failed the operation.
    Query {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { user_id } => {
                write!(f, "no identity with id {user_id}")
            }
            Self::DuplicateEmail { email } => {
                write!(f, "an identity already exists for email '{email}'")
            }
            Self::UnknownRole { role_name } => {
                write!(f, "role '{role_name}' does not exist")
            }
            Self::Query { details } => {
                write!(f, "directory operation failed: {details}")
            }
        }
    }
}

impl std::error::Error for AdminError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_identity() {
        let user_id = UserId::new();
        let err = AdminError::NotFound { user_id };
        assert!(err.to_string().contains(&user_id.to_string()));
    }

    #[test]
    fn duplicate_email_display() {
        let err = AdminError::DuplicateEmail {
            email: "jane.doe@corp.com".to_string(),
        };
        assert!(err.to_string().contains("jane.doe@corp.com"));
    }

    #[test]
    fn unknown_role_display() {
        let err = AdminError::UnknownRole {
            role_name: "wizard".to_string(),
        };
        assert!(err.to_string().contains("wizard"));
    }
}
