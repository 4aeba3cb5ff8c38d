//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Client messages follow the app's taxonomy: auth
//! errors get their mapped messages, validation errors are returned as-is,
//! backend failures are summarized without internals. No retries anywhere;
//! every failure is terminal for that user action.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;
use crate::services::auth::AuthError;
use crate::services::images::ImageUploadError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Hosted backend operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Image upload failed.
    #[error("Image upload error: {0}")]
    Upload(#[from] ImageUploadError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client (validation failures included).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Backend(_) | Self::Session(_) | Self::Upload(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Backend(_) | Self::Upload(_) => StatusCode::BAD_GATEWAY,
            Self::Auth(err) => match err {
                AuthError::Credentials { .. } => StatusCode::UNAUTHORIZED,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Backend(_) => StatusCode::BAD_GATEWAY,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) => "Not found".to_owned(),
            Self::Backend(_) => "External service error".to_owned(),
            Self::Upload(_) => "Could not upload the image".to_owned(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Auth(err) => match err {
                AuthError::Backend(_) => "External service error".to_owned(),
                other => other.to_string(),
            },
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product p-123".to_owned());
        assert_eq!(err.to_string(), "Not found: product p-123");

        let err = AppError::BadRequest("invalid input".to_owned());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Backend(BackendError::Rejected {
                code: "HTTP_500".to_owned()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Backend(BackendError::NotFound("x".to_owned()))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_credential_errors_are_unauthorized() {
        let err = AppError::Auth(AuthError::Credentials {
            code: "INVALID_PASSWORD".to_owned(),
        });
        assert_eq!(status_of(err), StatusCode::UNAUTHORIZED);
    }
}
