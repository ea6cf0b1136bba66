//! User entity model and DTOs.

use columbia_core::roles::Role;
use columbia_core::types::{DbId, Timestamp};
use columbia_core::user::UserRecord;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    /// Stored role name. Unknown names rank as the lowest role.
    pub role: String,
    pub display_name: String,
    pub platform_id: String,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_name(&self.role)
    }

    pub fn into_record(self) -> UserRecord {
        UserRecord {
            role: self.role(),
            id: self.id,
            display_name: self.display_name,
            platform_id: self.platform_id,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating a user. Only the in-memory store accepts inserts; in
/// production users are created by the login flow.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub role: String,
    pub display_name: String,
    pub platform_id: String,
    pub avatar_url: Option<String>,
}
