//! User roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Access role of a storefront user.
///
/// The backend stores the role strings the mobile app always used:
/// `"admin"` and `"morador"`. `"resident"` is accepted as an input alias.
/// A profile with no role field resolves to [`Role::Resident`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can create, edit, and delete catalog products and view all orders.
    Admin,
    /// Can browse the catalog, fill a cart, and submit orders.
    #[default]
    #[serde(rename = "morador", alias = "resident")]
    Resident,
}

impl Role {
    /// Whether this role grants catalog mutation and order review access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The stored string form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Resident => "morador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_stored_strings() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Resident).unwrap(),
            "\"morador\""
        );
    }

    #[test]
    fn test_deserialize_alias() {
        let role: Role = serde_json::from_str("\"resident\"").unwrap();
        assert_eq!(role, Role::Resident);

        let role: Role = serde_json::from_str("\"morador\"").unwrap();
        assert_eq!(role, Role::Resident);
    }

    #[test]
    fn test_default_is_resident() {
        assert_eq!(Role::default(), Role::Resident);
        assert!(!Role::default().is_admin());
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
    }
}
