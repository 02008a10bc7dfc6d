//! User identity records.
//!
//! Identities are owned by the identity subsystem and referenced by loans
//! and savings accounts via id, never duplicated into them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role within the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular borrower/saver.
    Member,
    /// Administrative reviewer: drives loan review decisions.
    Admin,
}

/// A resolved user identity, attached to every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Opaque unique id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role flag.
    pub role: Role,
}

impl UserIdentity {
    /// Returns true if this identity carries administrative privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
