//! Auth route handlers.
//!
//! Login resolves the user's role before the session is considered
//! established; a failed resolution fails the login. Registration creates
//! the account and its profile document but does not start a session.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::{info, instrument};

use condo_market_core::Role;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::Registration;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub apartment: String,
    /// Requested role; omitted means resident.
    #[serde(default)]
    pub role: Role,
}

/// Sign in and start a session.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentUser>, AppError> {
    let user = state.auth().login(&body.email, &body.password).await?;

    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    info!(uid = %user.id, role = %user.role, "user logged in");
    Ok(Json(user))
}

/// Create an account.
///
/// No session is started: the client is expected to log in with the new
/// credentials.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    if body.apartment.trim().is_empty() {
        return Err(AppError::BadRequest("apartment is required".to_owned()));
    }
    if body.password.len() < 6 {
        return Err(AppError::BadRequest(
            "password must be at least 6 characters".to_owned(),
        ));
    }

    let user = state
        .auth()
        .register(Registration {
            name: body.name,
            email: body.email,
            password: body.password,
            apartment: body.apartment,
            role: body.role,
        })
        .await?;

    info!(uid = %user.id, "account created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": user.id, "message": "Account created, please log in" })),
    ))
}

/// End the session.
///
/// Also drops the cached role so the next login observes role changes made
/// on the backend.
#[instrument(skip(state, session))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    if let Some(user) = session
        .get::<CurrentUser>(crate::models::session_keys::CURRENT_USER)
        .await?
    {
        state.auth().invalidate_role(&user.id);
    }

    clear_current_user(&session).await?;
    session.flush().await?;
    clear_sentry_user();

    Ok(Json(json!({ "message": "Logged out" })))
}
