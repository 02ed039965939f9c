//! Account roles issued by the shop API at login.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Role attached to a session.
///
/// The API sends `"user"` or `"admin"`. Anything else, including a missing
/// role, is treated as a plain user so that admin features are never
/// unlocked by an unexpected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Whether this role may create products.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Parse a role string, falling back to [`Role::User`].
    #[must_use]
    pub fn from_api(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }

    /// Wire/display name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map_or(Self::User, Self::from_api))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_api() {
        assert_eq!(Role::from_api("admin"), Role::Admin);
        assert_eq!(Role::from_api("ADMIN"), Role::Admin);
        assert_eq!(Role::from_api("user"), Role::User);
        assert_eq!(Role::from_api("superuser"), Role::User);
    }

    #[test]
    fn test_role_deserialize_null_is_user() {
        let role: Role = serde_json::from_str("null").expect("deserialize");
        assert_eq!(role, Role::User);
        let role: Role = serde_json::from_str("\"admin\"").expect("deserialize");
        assert!(role.is_admin());
    }
}
