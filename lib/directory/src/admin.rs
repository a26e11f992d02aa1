//! Administrative user operations.
//!
//! Provisioning, editing, and deactivating identities. Every mutation
//! writes a best-effort audit entry attributed to the acting
//! administrator; an audit outage never fails the mutation itself.
//!
//! Identities are never hard-deleted. Deactivation flips the active flag,
//! which makes the identity invisible to authentication while preserving
//! the rows the audit trail refers to.

use crate::error::AdminError;
use atrium_audit::{ActionType, AuditEntry, AuditRecorder, record_best_effort};
use atrium_core::UserId;
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use tracing::{info, instrument};

/// A provisioning request for a new identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub full_name: String,
    /// Email; also the sign-in key after normalization.
    pub email: String,
    /// Initial secret, stored as the opaque comparison value.
    pub secret: String,
    /// Role to assign. Must name an existing role.
    pub role_name: String,
    /// Department, if tracked.
    pub department: Option<String>,
    /// Brand access scope, if tracked.
    pub brand_access: Option<String>,
}

/// A partial edit of an existing identity. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name.
    pub full_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New secret.
    pub secret: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New brand access scope.
    pub brand_access: Option<String>,
}

impl UserUpdate {
    /// Returns true if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.secret.is_none()
            && self.department.is_none()
            && self.brand_access.is_none()
    }
}

/// A listing row for the user-management page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySummary {
    /// The identity's id.
    pub user_id: UserId,
    /// Stored email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Assigned role, if any. `None` means the identity cannot sign in.
    pub role_name: Option<String>,
    /// Whether the identity may authenticate.
    pub active: bool,
    /// Department, if tracked.
    pub department: Option<String>,
    /// Brand access scope, if tracked.
    pub brand_access: Option<String>,
}

/// Row type for identity listings.
#[derive(FromRow)]
struct SummaryRow {
    user_id: String,
    email: String,
    full_name: String,
    role_name: Option<String>,
    active: bool,
    department: Option<String>,
    brand_access: Option<String>,
}

impl SummaryRow {
    fn try_into_summary(self) -> Result<IdentitySummary, AdminError> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| AdminError::Query {
            details: format!("invalid user id '{}': {}", self.user_id, e),
        })?;
        Ok(IdentitySummary {
            user_id,
            email: self.email,
            full_name: self.full_name,
            role_name: self.role_name,
            active: self.active,
            department: self.department,
            brand_access: self.brand_access,
        })
    }
}

/// Administrative operations over the warehouse identity tables.
pub struct UserAdmin<R> {
    pool: PgPool,
    recorder: R,
}

impl<R: AuditRecorder> UserAdmin<R> {
    /// Creates the admin surface over the given pool and audit recorder.
    #[must_use]
    pub fn new(pool: PgPool, recorder: R) -> Self {
        Self { pool, recorder }
    }

    /// Provisions a new identity and its role assignment atomically.
    ///
    /// The identity insert and the role assignment happen in one
    /// transaction: a user visible to authentication always has its role
    /// row, so provisioning can never strand an account in the
    /// no-role-assigned state.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn provision(
        &self,
        new_user: NewUser,
        actor_email: &str,
    ) -> Result<UserId, Report<AdminError>> {
        let user_id = UserId::new();

        let mut tx = self.pool.begin().await.map_err(query_error)?;

        sqlx::query(
            r#"
            INSERT INTO identities (user_id, email, full_name, secret, active, department, brand_access)
            VALUES ($1, $2, $3, $4, TRUE, $5, $6)
            "#,
        )
        .bind(user_id.to_string())
        .bind(new_user.email.trim())
        .bind(&new_user.full_name)
        .bind(&new_user.secret)
        .bind(new_user.department.as_deref())
        .bind(new_user.brand_access.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_or_query(e, &new_user.email))?;

        sqlx::query(
            r#"
            INSERT INTO role_assignments (user_id, role_name)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id.to_string())
        .bind(&new_user.role_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| unknown_role_or_query(e, &new_user.role_name))?;

        tx.commit().await.map_err(query_error)?;

        info!(user_id = %user_id, role = %new_user.role_name, "provisioned identity");
        record_best_effort(
            &self.recorder,
            AuditEntry::new(
                ActionType::CreateUser,
                format!("Provisioned: {}", new_user.email.trim()),
                actor_email,
            ),
        )
        .await;

        Ok(user_id)
    }

    /// Applies a partial edit to an existing identity.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        user_id: UserId,
        update: UserUpdate,
        actor_email: &str,
    ) -> Result<(), Report<AdminError>> {
        if update.is_empty() {
            return Ok(());
        }

        let result = sqlx::query(
            r#"
            UPDATE identities
            SET full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                secret = COALESCE($4, secret),
                department = COALESCE($5, department),
                brand_access = COALESCE($6, brand_access)
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.to_string())
        .bind(update.full_name.as_deref())
        .bind(update.email.as_deref().map(str::trim))
        .bind(update.secret.as_deref())
        .bind(update.department.as_deref())
        .bind(update.brand_access.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            duplicate_or_query(e, update.email.as_deref().unwrap_or_default())
        })?;

        if result.rows_affected() == 0 {
            return Err(AdminError::NotFound { user_id }.into());
        }

        record_best_effort(
            &self.recorder,
            AuditEntry::new(ActionType::UpdateUser, format!("ID: {user_id}"), actor_email),
        )
        .await;

        Ok(())
    }

    /// Deactivates an identity (soft delete).
    ///
    /// The identity stops matching authentication lookups immediately;
    /// its rows remain for the audit trail.
    #[instrument(skip(self))]
    pub async fn deactivate(
        &self,
        user_id: UserId,
        actor_email: &str,
    ) -> Result<(), Report<AdminError>> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET active = FALSE
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(AdminError::NotFound { user_id }.into());
        }

        record_best_effort(
            &self.recorder,
            AuditEntry::new(
                ActionType::DeactivateUser,
                format!("Deactivated: {user_id}"),
                actor_email,
            ),
        )
        .await;

        Ok(())
    }

    /// Lists all identities for the user-management page, including
    /// deactivated ones and ones missing a role assignment.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<IdentitySummary>, Report<AdminError>> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT i.user_id, i.email, i.full_name, a.role_name, i.active, i.department, i.brand_access
            FROM identities i
            LEFT JOIN role_assignments a ON i.user_id = a.user_id
            ORDER BY i.email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.into_iter()
            .map(|r| r.try_into_summary().map_err(Report::from))
            .collect()
    }
}

fn query_error(e: sqlx::Error) -> AdminError {
    AdminError::Query {
        details: e.to_string(),
    }
}

fn duplicate_or_query(e: sqlx::Error, email: &str) -> AdminError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AdminError::DuplicateEmail {
            email: email.trim().to_string(),
        },
        _ => query_error(e),
    }
}

fn unknown_role_or_query(e: sqlx::Error, role_name: &str) -> AdminError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AdminError::UnknownRole {
            role_name: role_name.to_string(),
        },
        _ => query_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::WarehouseCredentialStore;
    use async_trait::async_trait;
    use atrium_access::CredentialStore;
    use atrium_audit::AuditError;
    use std::sync::{Arc, Mutex};

    /// Collects audit entries, optionally failing every write.
    #[derive(Clone, Default)]
    struct MemoryRecorder {
        entries: Arc<Mutex<Vec<AuditEntry>>>,
        fail_writes: bool,
    }

    impl MemoryRecorder {
        fn recorded(&self) -> Vec<AuditEntry> {
            self.entries.lock().expect("recorder mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl AuditRecorder for MemoryRecorder {
        async fn record(&self, entry: &AuditEntry) -> Result<(), Report<AuditError>> {
            if self.fail_writes {
                return Err(AuditError::WriteFailed {
                    details: "audit store offline".to_string(),
                }
                .into());
            }
            self.entries
                .lock()
                .expect("recorder mutex poisoned")
                .push(entry.clone());
            Ok(())
        }
    }

    async fn seed_role(pool: &PgPool, role_name: &str, can_edit_users: bool) {
        sqlx::query("INSERT INTO roles (role_name, can_edit_users) VALUES ($1, $2)")
            .bind(role_name)
            .bind(can_edit_users)
            .execute(pool)
            .await
            .expect("seed role");
    }

    fn jane() -> NewUser {
        NewUser {
            full_name: "Jane Doe".to_string(),
            email: "jane.doe@corp.com".to_string(),
            secret: "Temp123".to_string(),
            role_name: "super_admin".to_string(),
            department: Some("Data Services".to_string()),
            brand_access: None,
        }
    }

    #[sqlx::test]
    async fn provision_creates_identity_with_assignment_and_audits(pool: PgPool) {
        seed_role(&pool, "super_admin", true).await;
        let recorder = MemoryRecorder::default();
        let admin = UserAdmin::new(pool.clone(), recorder.clone());

        let user_id = admin
            .provision(jane(), "root@corp.com")
            .await
            .expect("should provision");

        let store = WarehouseCredentialStore::new(pool);
        let record = store
            .find_active_by_email("jane.doe@corp.com")
            .await
            .expect("lookup")
            .expect("identity should be active");
        assert_eq!(record.user_id, user_id);

        let identity = store
            .resolve_authorized_identity(user_id)
            .await
            .expect("lookup")
            .expect("role should be assigned");
        assert_eq!(identity.role_name, "super_admin");
        assert!(identity.can_edit_users());

        let entries = recorder.recorded();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action_type, ActionType::CreateUser);
        assert_eq!(entries[0].actor_email, "root@corp.com");
        assert!(entries[0].details.contains("jane.doe@corp.com"));
    }

    #[sqlx::test]
    async fn provision_rolls_back_identity_when_role_is_unknown(pool: PgPool) {
        let recorder = MemoryRecorder::default();
        let admin = UserAdmin::new(pool.clone(), recorder.clone());

        let mut request = jane();
        request.role_name = "wizard".to_string();
        let err = admin
            .provision(request, "root@corp.com")
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("wizard"));

        // The identity insert must not survive the failed assignment.
        let identities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM identities")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(identities, 0);
        assert!(recorder.recorded().is_empty());
    }

    #[sqlx::test]
    async fn provision_rejects_duplicate_normalized_email(pool: PgPool) {
        seed_role(&pool, "super_admin", true).await;
        let admin = UserAdmin::new(pool, MemoryRecorder::default());

        admin
            .provision(jane(), "root@corp.com")
            .await
            .expect("first provision");

        let mut again = jane();
        again.email = " JANE.DOE@corp.com ".to_string();
        let err = admin
            .provision(again, "root@corp.com")
            .await
            .expect_err("should collide under normalization");
        assert!(err.to_string().contains("already exists"));
    }

    #[sqlx::test]
    async fn provision_succeeds_when_audit_store_is_down(pool: PgPool) {
        seed_role(&pool, "super_admin", true).await;
        let recorder = MemoryRecorder {
            fail_writes: true,
            ..Default::default()
        };
        let admin = UserAdmin::new(pool, recorder);

        admin
            .provision(jane(), "root@corp.com")
            .await
            .expect("audit outage must not fail provisioning");
    }

    #[sqlx::test]
    async fn update_edits_fields_and_audits_the_actor(pool: PgPool) {
        seed_role(&pool, "super_admin", true).await;
        let recorder = MemoryRecorder::default();
        let admin = UserAdmin::new(pool, recorder.clone());
        let user_id = admin
            .provision(jane(), "root@corp.com")
            .await
            .expect("provision");

        admin
            .update(
                user_id,
                UserUpdate {
                    full_name: Some("Jane A. Doe".to_string()),
                    ..Default::default()
                },
                "root@corp.com",
            )
            .await
            .expect("update");

        let listed = admin.list().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].full_name, "Jane A. Doe");
        assert_eq!(listed[0].role_name.as_deref(), Some("super_admin"));

        let entries = recorder.recorded();
        let last = entries.last().expect("update should audit");
        assert_eq!(last.action_type, ActionType::UpdateUser);
        assert_eq!(last.actor_email, "root@corp.com");
        assert!(last.details.contains(&user_id.to_string()));
    }

    #[sqlx::test]
    async fn update_unknown_identity_is_not_found(pool: PgPool) {
        let admin = UserAdmin::new(pool, MemoryRecorder::default());
        let user_id = UserId::new();

        let err = admin
            .update(
                user_id,
                UserUpdate {
                    full_name: Some("Nobody".to_string()),
                    ..Default::default()
                },
                "root@corp.com",
            )
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains(&user_id.to_string()));
    }

    #[sqlx::test]
    async fn deactivate_hides_identity_from_authentication_and_audits(pool: PgPool) {
        seed_role(&pool, "analyst", false).await;
        let recorder = MemoryRecorder::default();
        let admin = UserAdmin::new(pool.clone(), recorder.clone());
        let mut request = jane();
        request.role_name = "analyst".to_string();
        let user_id = admin
            .provision(request, "root@corp.com")
            .await
            .expect("provision");

        admin
            .deactivate(user_id, "root@corp.com")
            .await
            .expect("deactivate");

        // Gone from authentication, still present in the listing.
        let store = WarehouseCredentialStore::new(pool);
        assert!(
            store
                .find_active_by_email("jane.doe@corp.com")
                .await
                .expect("lookup")
                .is_none()
        );
        let listed = admin.list().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].active);

        let entries = recorder.recorded();
        let last = entries.last().expect("deactivate should audit");
        assert_eq!(last.action_type, ActionType::DeactivateUser);
        assert_eq!(last.actor_email, "root@corp.com");
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UserUpdate::default().is_empty());
        assert!(
            !UserUpdate {
                full_name: Some("Jane Doe".to_string()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn summary_row_converts() {
        let user_id = UserId::new();
        let row = SummaryRow {
            user_id: user_id.to_string(),
            email: "jane.doe@corp.com".to_string(),
            full_name: "Jane Doe".to_string(),
            role_name: None,
            active: true,
            department: Some("Data Services".to_string()),
            brand_access: None,
        };

        let summary = row.try_into_summary().expect("should convert");
        assert_eq!(summary.user_id, user_id);
        assert!(summary.role_name.is_none());
        assert!(summary.active);
    }

    #[test]
    fn summary_row_rejects_malformed_id() {
        let row = SummaryRow {
            user_id: "bogus".to_string(),
            email: "jane.doe@corp.com".to_string(),
            full_name: "Jane Doe".to_string(),
            role_name: None,
            active: true,
            department: None,
            brand_access: None,
        };

        assert!(row.try_into_summary().is_err());
    }
}
