//! Session keys.
//!
//! The session is the only state the service holds: the resolved user and
//! the in-memory cart. Everything durable lives in the hosted backend.

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the session's cart.
    pub const CART: &str = "cart";
}
