//! Public user record shared by the server and the client.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// The user record returned by `GET /api/auth/me`.
///
/// Always built from the store of record, never from anything the client
/// sent or from the session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: DbId,
    pub role: Role,
    pub display_name: String,
    /// Account id on the external game platform.
    pub platform_id: String,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
