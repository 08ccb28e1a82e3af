//! Admin user domain types.

use chrono::{DateTime, Utc};

use linkbio_core::{AdminUserId, Username};

/// An admin user (domain type). The password hash never leaves the
/// repository except for verification.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: Username,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
