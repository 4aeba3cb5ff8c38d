//! Application state shared across all routes.

use std::sync::Arc;

use crate::backend::DocumentsClient;
use crate::config::StorefrontConfig;
use crate::services::auth::SessionResolver;
use crate::services::images::ImageHostClient;

/// Shared application state.
///
/// Cloning is cheap: all fields live behind a single `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    documents: DocumentsClient,
    auth: SessionResolver,
    images: ImageHostClient,
}

impl AppState {
    /// Build the application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let documents = DocumentsClient::new(&config.backend);
        let auth = SessionResolver::new(&config.backend, documents.clone());
        let images = ImageHostClient::new(&config.images);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                documents,
                auth,
                images,
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Hosted document-store client.
    #[must_use]
    pub fn documents(&self) -> &DocumentsClient {
        &self.inner.documents
    }

    /// Authentication and role resolution.
    #[must_use]
    pub fn auth(&self) -> &SessionResolver {
        &self.inner.auth
    }

    /// Image host client.
    #[must_use]
    pub fn images(&self) -> &ImageHostClient {
        &self.inner.images
    }
}
