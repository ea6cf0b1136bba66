//! Role hierarchy used for every access check.
//!
//! Roles form a total order. A higher role satisfies any requirement a lower
//! role satisfies. Role names are stored as text in the `users.role` column;
//! any name that is not recognised ranks as the lowest role.

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// A permission level, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    /// Any authenticated account holder.
    #[default]
    User,
    /// Bank staff with access to every account.
    Admin,
}

impl Role {
    /// Every role, lowest rank first.
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// Parse a stored role name. Unknown names map to the lowest role.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            ROLE_ADMIN => Self::Admin,
            _ => Self::User,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Position in the hierarchy. Larger is more privileged.
    pub fn rank(self) -> u8 {
        match self {
            Self::User => 0,
            Self::Admin => 1,
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Returns `true` when `actual` ranks at or above `required`.
pub fn can_access(actual: Role, required: Role) -> bool {
    actual.rank() >= required.rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_user_requirement() {
        assert!(can_access(Role::Admin, Role::User));
    }

    #[test]
    fn user_does_not_satisfy_admin_requirement() {
        assert!(!can_access(Role::User, Role::Admin));
    }

    #[test]
    fn access_follows_rank_for_every_pair() {
        for a in Role::ALL {
            for b in Role::ALL {
                assert_eq!(
                    can_access(a, b),
                    a.rank() >= b.rank(),
                    "can_access({a}, {b}) disagrees with rank order"
                );
            }
        }
    }

    #[test]
    fn every_pair_is_comparable() {
        for a in Role::ALL {
            for b in Role::ALL {
                assert!(can_access(a, b) || can_access(b, a));
            }
        }
    }

    #[test]
    fn unknown_role_names_rank_lowest() {
        assert_eq!(Role::from_name("superuser"), Role::User);
        assert_eq!(Role::from_name(""), Role::User);
        assert!(!can_access(Role::from_name("root"), Role::Admin));
        assert!(can_access(Role::from_name("root"), Role::User));
    }

    #[test]
    fn role_names_are_case_insensitive() {
        assert_eq!(Role::from_name(" Admin "), Role::Admin);
    }

    #[test]
    fn serde_uses_lowercase_names_and_tolerates_unknowns() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let parsed: Role = serde_json::from_str("\"banker\"").unwrap();
        assert_eq!(parsed, Role::User);
    }
}
