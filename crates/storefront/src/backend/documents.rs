//! Document store client.
//!
//! Generic typed access to the hosted backend's JSON document collections.
//! Collections are flat maps from string id to document; listings support
//! server-side ordering and equality filters.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::backend::{BackendError, rejection_from_body};
use crate::config::BackendConfig;

/// Query parameters for a collection listing.
///
/// Ordering is applied server-side; the client never re-sorts. Order and
/// product listings ask for newest first.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    params: Vec<(String, String)>,
}

impl ListQuery {
    /// Empty query: backend default ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Order results by `field`, descending.
    #[must_use]
    pub fn order_by_desc(mut self, field: &str) -> Self {
        self.params.push(("orderBy".to_owned(), field.to_owned()));
        self.params.push(("direction".to_owned(), "desc".to_owned()));
        self
    }

    /// Keep only documents whose `field` equals `value`.
    #[must_use]
    pub fn filter_eq(mut self, field: &str, value: &str) -> Self {
        self.params.push((field.to_owned(), value.to_owned()));
        self
    }

    fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Client for the hosted document store.
///
/// Cheaply cloneable; all clones share one HTTP connection pool.
#[derive(Clone)]
pub struct DocumentsClient {
    inner: Arc<DocumentsClientInner>,
}

struct DocumentsClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DocumentsClient {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(DocumentsClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                api_key: config.api_key.expose_secret().to_owned(),
            }),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{collection}", self.inner.base_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/v1/{collection}/{id}", self.inner.base_url)
    }

    /// Decode a response, mapping 404 and error envelopes.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(resource.to_owned()));
        }

        if !status.is_success() {
            return Err(rejection_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                resource = %resource,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse document store response"
            );
            BackendError::Parse(e)
        })
    }

    /// Get one document by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the document does not exist, or an error if
    /// the request fails.
    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<T, BackendError> {
        let response = self
            .inner
            .client
            .get(self.document_url(collection, id))
            .header("X-Api-Key", &self.inner.api_key)
            .send()
            .await?;

        Self::decode(response, &format!("{collection}/{id}")).await
    }

    /// List documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, query), fields(collection = %collection))]
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .inner
            .client
            .get(self.collection_url(collection))
            .header("X-Api-Key", &self.inner.api_key)
            .query(query.params())
            .send()
            .await?;

        Self::decode(response, collection).await
    }

    /// Create a document with a server-assigned id.
    ///
    /// The backend fills the id and `created_at` timestamp and returns the
    /// stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, document), fields(collection = %collection))]
    pub async fn create<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        collection: &str,
        document: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .inner
            .client
            .post(self.collection_url(collection))
            .header("X-Api-Key", &self.inner.api_key)
            .json(document)
            .send()
            .await?;

        Self::decode(response, collection).await
    }

    /// Create or replace the document at a known id.
    ///
    /// Last write wins; no optimistic concurrency (acceptable for the
    /// domain's low write concurrency).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, document), fields(collection = %collection, id = %id))]
    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        document: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .inner
            .client
            .put(self.document_url(collection, id))
            .header("X-Api-Key", &self.inner.api_key)
            .json(document)
            .send()
            .await?;

        Self::decode(response, &format!("{collection}/{id}")).await
    }

    /// Delete a document by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the document does not exist, or an error if
    /// the request fails.
    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .delete(self.document_url(collection, id))
            .header("X-Api-Key", &self.inner.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("{collection}/{id}")));
        }
        if !status.is_success() {
            let body = response.text().await?;
            return Err(rejection_from_body(status, &body));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_params() {
        let query = ListQuery::new()
            .order_by_desc("created_at")
            .filter_eq("user_id", "u-1");

        assert_eq!(
            query.params(),
            &[
                ("orderBy".to_owned(), "created_at".to_owned()),
                ("direction".to_owned(), "desc".to_owned()),
                ("user_id".to_owned(), "u-1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(ListQuery::new().params().is_empty());
    }
}
