//! Authentication error types.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] condo_market_core::EmailError),

    /// The identity provider rejected the credentials.
    #[error("{}", provider_message(.code))]
    Credentials {
        /// Provider error code, e.g. `EMAIL_NOT_FOUND`.
        code: String,
    },

    /// Backend request failed.
    #[error("backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected { code } => Self::Credentials { code },
            other => Self::Backend(other),
        }
    }
}

/// User-facing message for a known identity provider error code.
///
/// Unknown codes get a generic message; provider codes are never shown to
/// users verbatim.
#[must_use]
pub fn provider_message(code: &str) -> &'static str {
    match code {
        "INVALID_EMAIL" => "Invalid e-mail address.",
        "EMAIL_NOT_FOUND" => "User not found.",
        "INVALID_PASSWORD" => "Wrong password.",
        "EMAIL_EXISTS" => "An account with this e-mail already exists.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.",
        _ => "Unexpected error. Please try again.",
    }
}
