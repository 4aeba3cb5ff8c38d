//! User session types.

use serde::{Deserialize, Serialize};

use condo_market_core::{Email, Role, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user:
/// the provider uid, the email, and the role resolved at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Provider-assigned user id.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Role resolved at login.
    pub role: Role,
}

impl CurrentUser {
    /// Whether the session belongs to an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
