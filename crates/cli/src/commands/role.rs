//! Role management commands.
//!
//! Role changes happen directly on the `users` collection. A logged-in
//! session observes the change at its next login, or once the service's
//! role cache entry expires.
//!
//! # Usage
//!
//! ```bash
//! cm-cli role grant -u <uid>
//! cm-cli role revoke -u <uid>
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_API_URL` - Base URL of the hosted backend
//! - `BACKEND_API_KEY` - API key for the hosted backend

use thiserror::Error;

use condo_market_core::Role;
use condo_market_storefront::backend::types::UserProfile;
use condo_market_storefront::backend::{BackendError, DocumentsClient};
use condo_market_storefront::config::{BackendConfig, ConfigError};
use condo_market_storefront::services::auth::USERS_COLLECTION;

/// Errors that can occur during role operations.
#[derive(Debug, Error)]
pub enum RoleError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No profile document for the uid.
    #[error("No profile found for uid: {0}")]
    UnknownUser(String),

    /// Backend operation failed.
    #[error("Backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for RoleError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(resource) => Self::UnknownUser(resource),
            other => Self::Backend(other),
        }
    }
}

/// Set the role on a user's profile document.
pub async fn set_role(uid: &str, role: Role) -> Result<(), RoleError> {
    let config = BackendConfig::from_env()?;
    let documents = DocumentsClient::new(&config);

    let mut profile: UserProfile = documents.get(USERS_COLLECTION, uid).await?;

    if profile.role == role {
        tracing::info!("{} ({}) already has role {}", profile.name, uid, role);
        return Ok(());
    }

    profile.role = role;
    let _stored: UserProfile = documents.put(USERS_COLLECTION, uid, &profile).await?;

    tracing::info!("{} ({}) is now {}", profile.name, uid, role);
    Ok(())
}
