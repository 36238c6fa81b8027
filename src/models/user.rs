//! Application user model.
//!
//! Users exist so payroll records can name their creator. Authentication
//! is handled outside this crate, so no credentials are stored here.

use serde::{Deserialize, Serialize};

use super::UserId;

/// An application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Free-text role label (e.g., "ADMIN", "HR").
    pub role: String,
    /// False once the user has been deactivated.
    pub is_active: bool,
}

/// The caller-supplied fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Free-text role label.
    pub role: String,
}

impl User {
    /// Builds a stored user from its draft and the id the store assigned.
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        User {
            id,
            username: new.username,
            full_name: new.full_name,
            role: new.role,
            is_active: true,
        }
    }
}
