//! Hosted backend API clients.
//!
//! # Architecture
//!
//! - The hosted backend is the source of truth - NO local persistence,
//!   direct API calls over `reqwest` with JSON bodies
//! - Two surfaces: the identity provider (sign-in/sign-up) and the
//!   document store (`users`, `products`, `orders` collections)
//! - Responses are read as text first so parse failures can be logged
//!   with the offending body
//!
//! # Example
//!
//! ```rust,ignore
//! use condo_market_storefront::backend::{DocumentsClient, ListQuery};
//! use condo_market_core::Product;
//!
//! let documents = DocumentsClient::new(&config.backend);
//!
//! // Newest products first
//! let products: Vec<Product> = documents
//!     .list("products", &ListQuery::new().order_by_desc("created_at"))
//!     .await?;
//! ```

mod documents;
mod identity;
pub mod types;

pub use documents::{DocumentsClient, ListQuery};
pub use identity::{AuthenticatedAccount, IdentityClient};

use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request with a provider error code.
    #[error("backend rejected request: {code}")]
    Rejected {
        /// Provider error code, e.g. `EMAIL_NOT_FOUND`.
        code: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Error envelope returned by the backend on failure.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turn a non-success response body into a [`BackendError`].
///
/// The backend reports failures as `{"error": {"code": ..., "message":
/// "SOME_CODE"}}`; anything else becomes a `Rejected` with the raw body
/// truncated for logging.
fn rejection_from_body(status: reqwest::StatusCode, body: &str) -> BackendError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => BackendError::Rejected {
            code: envelope.error.message,
        },
        Err(_) => {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "backend returned non-success status without error envelope"
            );
            BackendError::Rejected {
                code: format!("HTTP_{}", status.as_u16()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_with_envelope() {
        let body = r#"{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}"#;
        let err = rejection_from_body(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, BackendError::Rejected { code } if code == "EMAIL_NOT_FOUND"));
    }

    #[test]
    fn test_rejection_without_envelope() {
        let err = rejection_from_body(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, BackendError::Rejected { code } if code == "HTTP_502"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("products/p-1".to_owned());
        assert_eq!(err.to_string(), "not found: products/p-1");
    }
}
