//! Request middleware: session layer and role-gate extractors.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireAuth};
pub use session::create_session_layer;
