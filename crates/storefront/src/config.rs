//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_API_URL` - Base URL of the hosted identity/document backend
//! - `BACKEND_API_KEY` - API key for the hosted backend
//! - `IMAGE_UPLOAD_KEY` - API key for the image hosting service
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `IMAGE_UPLOAD_URL` - Image host endpoint (default: <https://api.imgbb.com/1/upload>)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Hosted backend (identity + document store) configuration
    pub backend: BackendConfig,
    /// Image hosting configuration
    pub images: ImageHostConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Hosted backend configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. <https://backend.example.com>
    pub base_url: String,
    /// API key sent with every request
    pub api_key: SecretString,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Image hosting configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ImageHostConfig {
    /// Upload endpoint URL
    pub endpoint: String,
    /// API key passed with each upload
    pub api_key: SecretString,
}

impl std::fmt::Debug for ImageHostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHostConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Default image host endpoint.
const DEFAULT_IMAGE_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_owned(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_owned(), e.to_string())
            })?;

        let backend = BackendConfig::from_env()?;
        let images = ImageHostConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            backend,
            images,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    /// Load just the backend configuration from environment variables.
    ///
    /// Used by tools that talk to the backend without the rest of the
    /// storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("BACKEND_API_URL")?;
        validate_url("BACKEND_API_URL", &base_url)?;

        Ok(Self {
            base_url,
            api_key: get_required_secret("BACKEND_API_KEY")?,
        })
    }
}

impl ImageHostConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_env_or_default("IMAGE_UPLOAD_URL", DEFAULT_IMAGE_UPLOAD_URL);
        validate_url("IMAGE_UPLOAD_URL", &endpoint)?;

        Ok(Self {
            endpoint,
            api_key: get_required_secret("IMAGE_UPLOAD_KEY")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Check that a value parses as an absolute URL.
fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(drop)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            backend: BackendConfig {
                base_url: "https://backend.example.com".to_owned(),
                api_key: SecretString::from("backend_key_value"),
            },
            images: ImageHostConfig {
                endpoint: DEFAULT_IMAGE_UPLOAD_URL.to_owned(),
                api_key: SecretString::from("image_key_value"),
            },
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_output = format!("{:?}", config());

        // Public fields should be visible
        assert!(debug_output.contains("https://backend.example.com"));
        assert!(debug_output.contains(DEFAULT_IMAGE_UPLOAD_URL));

        // Secret fields should be redacted
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("backend_key_value"));
        assert!(!debug_output.contains("image_key_value"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("TEST", "https://example.com/v1").is_ok());
        assert!(validate_url("TEST", "not a url").is_err());
    }
}
