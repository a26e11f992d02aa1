//! Role-gated page visibility.
//!
//! Given a session snapshot, computes the ordered set of pages the caller
//! may reach. This is a pure function of the session: no store lookups,
//! no side effects, so the menu a client sees is exactly determined by
//! what authentication resolved.

use crate::session::SessionState;
use serde::{Deserialize, Serialize};

/// The portal's page surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Sign-in form; the only surface reachable without a session.
    Login,
    /// Default landing page for every authenticated session.
    Dashboard,
    /// User listing and editing.
    UserManagement,
    /// Administrative user provisioning.
    CreateUser,
    /// Audit log viewer.
    AuditLog,
    /// Ad-hoc SQL execution console.
    SqlConsole,
    /// Multi-source ETL console.
    EtlConsole,
}

impl Page {
    /// Human-readable page title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::UserManagement => "User Management",
            Self::CreateUser => "Create User",
            Self::AuditLog => "Security Audit",
            Self::SqlConsole => "SQL Studio",
            Self::EtlConsole => "ETL Console",
        }
    }

    /// Stable slug for routing.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::UserManagement => "user-management",
            Self::CreateUser => "create-user",
            Self::AuditLog => "audit-log",
            Self::SqlConsole => "sql-console",
            Self::EtlConsole => "etl-console",
        }
    }

    /// Returns true if this page requires the `can_edit_users` flag.
    #[must_use]
    pub fn requires_user_admin(&self) -> bool {
        matches!(
            self,
            Self::UserManagement
                | Self::CreateUser
                | Self::AuditLog
                | Self::SqlConsole
                | Self::EtlConsole
        )
    }
}

/// A page entry in the navigation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// Which page this entry points at.
    pub page: Page,
    /// Display title.
    pub title: &'static str,
    /// Routing slug.
    pub slug: &'static str,
    /// True for the page a fresh sign-in lands on.
    pub is_default: bool,
}

impl PageDescriptor {
    fn for_page(page: Page, is_default: bool) -> Self {
        Self {
            page,
            title: page.title(),
            slug: page.slug(),
            is_default,
        }
    }
}

/// Administrative pages in their stable navigation order.
const ADMIN_PAGES: [Page; 5] = [
    Page::UserManagement,
    Page::CreateUser,
    Page::AuditLog,
    Page::SqlConsole,
    Page::EtlConsole,
];

/// Computes the pages visible to the given session, in navigation order.
///
/// Unauthenticated sessions see only the login page. Authenticated
/// sessions always see the dashboard (the default page); the
/// administrative set follows only when the session's role carries
/// `can_edit_users`.
#[must_use]
pub fn visible_pages(session: &SessionState) -> Vec<PageDescriptor> {
    if !session.is_authenticated() {
        return vec![PageDescriptor::for_page(Page::Login, true)];
    }

    let mut pages = vec![PageDescriptor::for_page(Page::Dashboard, true)];
    if session.can_edit_users() {
        pages.extend(
            ADMIN_PAGES
                .iter()
                .map(|page| PageDescriptor::for_page(*page, false)),
        );
    }
    pages
}
