//! Session layer configuration.
//!
//! Sessions are held in memory: they carry only the logged-in user and the
//! cart, both of which are rebuilt by logging in again. All durable state
//! lives in the hosted backend.

use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Create the session management layer.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name("condo_market_session")
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)))
}
