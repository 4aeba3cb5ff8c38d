//! Session resolution service.
//!
//! Sign-in, sign-up, and role resolution against the hosted backend.
//! Roles are cached locally (`role_<uid>`, 5-minute TTL) so a role change
//! on the backend is eventually observed without an explicit invalidation
//! path.

mod error;

pub use error::{AuthError, provider_message};

use std::time::Duration;

use moka::sync::Cache;
use tracing::{debug, instrument};

use condo_market_core::{Email, Role, UserId};

use crate::backend::types::UserProfile;
use crate::backend::{DocumentsClient, IdentityClient};
use crate::config::BackendConfig;
use crate::models::CurrentUser;

/// Role cache TTL. Bounds how long a stale role can be served.
const ROLE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Collection holding user profile documents, keyed by uid.
pub const USERS_COLLECTION: &str = "users";

/// Outcome of resolving a user's role.
///
/// A fetch failure is an `Err(AuthError)` from the resolver instead of a
/// variant here: callers surface it as a visible, retryable error rather
/// than hanging on a loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleResolution {
    /// The role came from the cache or the profile document.
    Resolved(Role),
    /// No profile document (or no role field); the default was applied.
    Defaulted(Role),
}

impl RoleResolution {
    /// The resolved role, however it was obtained.
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::Resolved(role) | Self::Defaulted(role) => role,
        }
    }
}

/// Registration data for a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub apartment: String,
    pub role: Role,
}

/// Resolves authenticated sessions.
///
/// Wraps the identity provider and the `users` collection; owns the local
/// role cache.
#[derive(Clone)]
pub struct SessionResolver {
    identity: IdentityClient,
    documents: DocumentsClient,
    roles: Cache<String, Role>,
}

impl SessionResolver {
    /// Create a new session resolver.
    #[must_use]
    pub fn new(config: &BackendConfig, documents: DocumentsClient) -> Self {
        let roles = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(ROLE_CACHE_TTL)
            .build();

        Self {
            identity: IdentityClient::new(config),
            documents,
            roles,
        }
    }

    /// Sign in and resolve the user's role.
    ///
    /// # Errors
    ///
    /// Returns `Credentials` with a user-facing message on bad credentials,
    /// or a backend error if the profile fetch fails. A failed fetch never
    /// leaves the session half-resolved.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let account = self.identity.sign_in(email, password).await?;
        let email = Email::parse(&account.email)?;
        let resolution = self.resolve_role(&account.uid).await?;

        Ok(CurrentUser {
            id: account.uid,
            email,
            role: resolution.role(),
        })
    }

    /// Create an account and its profile document.
    ///
    /// The profile (name, email, apartment, role) is stored under the
    /// provider-assigned uid. Registration does not start a session; the
    /// caller is expected to log in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `Credentials` if the provider rejects the account (e.g.
    /// `EMAIL_EXISTS`), or a backend error if the profile write fails.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(&registration.email)?;

        let account = self
            .identity
            .sign_up(email.as_str(), &registration.password)
            .await?;

        let profile = UserProfile {
            name: registration.name,
            email: email.to_string(),
            apartment: registration.apartment,
            role: registration.role,
        };
        let _stored: UserProfile = self
            .documents
            .put(USERS_COLLECTION, account.uid.as_str(), &profile)
            .await?;

        self.roles
            .insert(role_cache_key(&account.uid), profile.role);

        Ok(CurrentUser {
            id: account.uid,
            email,
            role: profile.role,
        })
    }

    /// Resolve a user's role: cache first, then the profile document,
    /// defaulting to resident when neither has one.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the profile fetch fails for any reason
    /// other than the document being absent.
    #[instrument(skip(self), fields(uid = %uid))]
    pub async fn resolve_role(&self, uid: &UserId) -> Result<RoleResolution, AuthError> {
        let key = role_cache_key(uid);

        if let Some(role) = self.roles.get(&key) {
            debug!("role cache hit");
            return Ok(RoleResolution::Resolved(role));
        }

        let profile = match self
            .documents
            .get::<UserProfile>(USERS_COLLECTION, uid.as_str())
            .await
        {
            Ok(profile) => Some(profile),
            Err(crate::backend::BackendError::NotFound(_)) => None,
            Err(other) => return Err(other.into()),
        };

        let resolution = resolve_profile(profile.as_ref());
        self.roles.insert(key, resolution.role());

        Ok(resolution)
    }

    /// Drop the cached role for a user.
    ///
    /// Called on logout so the next login observes role changes made on
    /// the backend in the meantime.
    pub fn invalidate_role(&self, uid: &UserId) {
        self.roles.invalidate(&role_cache_key(uid));
    }
}

/// Role resolution rule for a fetched profile.
///
/// A present profile resolves to its role; an absent one defaults to
/// resident.
fn resolve_profile(profile: Option<&UserProfile>) -> RoleResolution {
    profile.map_or(
        RoleResolution::Defaulted(Role::default()),
        |p| RoleResolution::Resolved(p.role),
    )
}

/// Cache key for a user's role.
fn role_cache_key(uid: &UserId) -> String {
    format!("role_{uid}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_profile_defaults_to_resident() {
        let resolution = resolve_profile(None);
        assert_eq!(resolution, RoleResolution::Defaulted(Role::Resident));
        assert_eq!(resolution.role(), Role::Resident);
    }

    #[test]
    fn test_resolve_profile_role() {
        let profile = UserProfile {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            apartment: "302-B".to_owned(),
            role: Role::Admin,
        };

        let resolution = resolve_profile(Some(&profile));
        assert_eq!(resolution, RoleResolution::Resolved(Role::Admin));
    }

    #[test]
    fn test_role_cache_key() {
        assert_eq!(role_cache_key(&UserId::new("abc")), "role_abc");
    }
}
