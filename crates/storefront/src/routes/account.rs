//! Account route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::backend::types::UserProfile;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::auth::USERS_COLLECTION;
use crate::state::AppState;

/// Account overview: session identity plus the stored profile.
///
/// The profile can be absent when the document was never written or was
/// removed on the backend; the session itself is still valid.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: CurrentUser,
    pub profile: Option<UserProfile>,
}

/// The caller's account.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<AccountResponse>, AppError> {
    let profile = match state
        .documents()
        .get::<UserProfile>(USERS_COLLECTION, user.id.as_str())
        .await
    {
        Ok(profile) => Some(profile),
        Err(BackendError::NotFound(_)) => None,
        Err(other) => return Err(other.into()),
    };

    Ok(Json(AccountResponse { user, profile }))
}
