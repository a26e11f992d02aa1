//! Postgres implementation of the credential store read surface.

use async_trait::async_trait;
use atrium_access::{AuthorizedIdentity, CredentialRecord, CredentialStore, Permissions, StoreError};
use atrium_core::UserId;
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use tracing::instrument;

/// Row type for the active-identity lookup.
#[derive(FromRow)]
struct CredentialRow {
    user_id: String,
    secret: String,
}

impl CredentialRow {
    fn try_into_record(self) -> Result<CredentialRecord, StoreError> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| StoreError::Decode {
            details: format!("invalid user id '{}': {}", self.user_id, e),
        })?;
        Ok(CredentialRecord {
            user_id,
            secret: self.secret,
        })
    }
}

/// Row type for the identity/role join.
#[derive(FromRow)]
struct AuthorizedIdentityRow {
    email: String,
    full_name: String,
    role_name: String,
    can_edit_users: bool,
}

impl AuthorizedIdentityRow {
    fn into_identity(self) -> AuthorizedIdentity {
        AuthorizedIdentity {
            email: self.email,
            full_name: self.full_name,
            role_name: self.role_name,
            permissions: Permissions {
                can_edit_users: self.can_edit_users,
            },
        }
    }
}

/// Credential store backed by the warehouse's identity tables.
pub struct WarehouseCredentialStore {
    pool: PgPool,
}

impl WarehouseCredentialStore {
    /// Creates a store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for WarehouseCredentialStore {
    #[instrument(skip(self, normalized_email))]
    async fn find_active_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<CredentialRecord>, Report<StoreError>> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
            SELECT user_id, secret
            FROM identities
            WHERE lower(trim(email)) = $1 AND active = TRUE
            "#,
        )
        .bind(normalized_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable {
            details: e.to_string(),
        })?;

        match row {
            Some(r) => Ok(Some(r.try_into_record()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn resolve_authorized_identity(
        &self,
        user_id: UserId,
    ) -> Result<Option<AuthorizedIdentity>, Report<StoreError>> {
        let row: Option<AuthorizedIdentityRow> = sqlx::query_as(
            r#"
            SELECT i.email, i.full_name, r.role_name, r.can_edit_users
            FROM identities i
            INNER JOIN role_assignments a ON i.user_id = a.user_id
            INNER JOIN roles r ON a.role_name = r.role_name
            WHERE i.user_id = $1
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable {
            details: e.to_string(),
        })?;

        Ok(row.map(AuthorizedIdentityRow::into_identity))
    }
}
