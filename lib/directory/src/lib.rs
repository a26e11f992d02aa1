//! Warehouse-backed directory for the atrium portal.
//!
//! This crate is the database-facing side of the portal: a Postgres
//! implementation of the credential store read surface consumed by
//! atrium-access, the audit store write surface consumed by atrium-audit,
//! and the administrative user operations (provision, update, deactivate)
//! that drive the user-management pages.
//!
//! Every statement is parameterized. The warehouse tables this replaces
//! were queried with string-built SQL; that pattern is an injection hazard
//! and does not survive here.

pub mod admin;
pub mod audit_log;
pub mod config;
pub mod credential;
pub mod error;

// Re-export main types at crate root
pub use admin::{IdentitySummary, NewUser, UserAdmin, UserUpdate};
pub use audit_log::WarehouseAuditRecorder;
pub use config::{DirectoryConfig, PoolConfig};
pub use credential::WarehouseCredentialStore;
pub use error::AdminError;

use sqlx::PgPool;

/// Applies the directory schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
