//! Identity provider client.
//!
//! Email/password authentication against the hosted identity service.
//! The provider reports failures as symbolic codes (`EMAIL_NOT_FOUND`,
//! `INVALID_PASSWORD`, ...) which the auth service maps to user-facing
//! messages.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use condo_market_core::UserId;

use crate::backend::{BackendError, rejection_from_body};
use crate::config::BackendConfig;

/// A successfully authenticated account, as reported by the provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedAccount {
    /// Provider-assigned user id.
    #[serde(rename = "localId")]
    pub uid: UserId,
    /// The account email, echoed back by the provider.
    pub email: String,
    /// Short-lived session token. Held but never logged.
    pub id_token: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Client for the hosted identity provider.
///
/// Cheaply cloneable; all clones share one HTTP connection pool.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new identity provider client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                api_key: config.api_key.expose_secret().to_owned(),
            }),
        }
    }

    /// POST credentials to an accounts endpoint and decode the result.
    async fn submit(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, BackendError> {
        let response = self
            .inner
            .client
            .post(format!("{}/v1/accounts:{action}", self.inner.base_url))
            .query(&[("key", self.inner.api_key.as_str())])
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                action = %action,
                "failed to parse identity provider response"
            );
            BackendError::Parse(e)
        })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with the provider code on bad credentials, or an
    /// error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, BackendError> {
        self.submit("signInWithPassword", email, password).await
    }

    /// Create a new account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with the provider code (e.g. `EMAIL_EXISTS`) on
    /// failure, or an error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, BackendError> {
        self.submit("signUp", email, password).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_account() {
        let json = r#"{
            "localId": "uid-123",
            "email": "user@example.com",
            "idToken": "tok-abc"
        }"#;

        let account: AuthenticatedAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.uid, UserId::new("uid-123"));
        assert_eq!(account.email, "user@example.com");
        // The token must not leak through Debug
        assert!(!format!("{account:?}").contains("tok-abc"));
    }

    #[test]
    fn test_credentials_request_shape() {
        let body = serde_json::to_value(CredentialsRequest {
            email: "a@b.c",
            password: "secret",
            return_secure_token: true,
        })
        .unwrap();

        assert_eq!(body["email"], "a@b.c");
        assert_eq!(body["returnSecureToken"], true);
    }
}
