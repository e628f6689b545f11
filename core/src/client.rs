//! Document-oriented operations over the request pipeline.
//!
//! # Design
//! `SearchClient` is a thin mapping layer: each operation computes a
//! `(method, endpoint, body)` triple and delegates to [`Api::request`],
//! returning its outcome unchanged. All interpretation — serialization,
//! credential attachment, status classification — lives in the transport
//! layer, so the operations here stay one-liners over the endpoint table.
//!
//! Path segments are used as given; callers supply URL-safe `type` and `id`
//! values.

use std::sync::Arc;

use serde::Serialize;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::{Api, HttpTransport, Payload, ReqwestTransport};

/// Async client for a document-search service.
///
/// Configuration (base URL, app namespace, credential) is fixed at
/// construction; the client is `Clone` and safe to share across tasks.
/// Requests resolve to the app's root, `{base_url}/{app}`.
#[derive(Clone)]
pub struct SearchClient {
    api: Api,
}

impl SearchClient {
    /// Create a client backed by the production reqwest transport.
    pub fn new(base_url: &str, app: &str, credentials: &str) -> Self {
        Self::with_transport(base_url, app, credentials, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(
        base_url: &str,
        app: &str,
        credentials: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let root = format!("{}/{}", base_url.trim_end_matches('/'), app);
        Self {
            api: Api::new(&root, credentials, transport),
        }
    }

    /// Add or replace a typed JSON document, making it searchable.
    ///
    /// Without an `id` the service assigns one (POST to `{type}`); with an
    /// `id` the document is written at that address (PUT to `{type}/{id}`).
    pub async fn index<T>(
        &self,
        doc_type: &str,
        id: Option<&str>,
        body: &T,
    ) -> Result<Payload, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let (method, endpoint) = match id {
            Some(id) => (HttpMethod::Put, format!("{doc_type}/{id}")),
            None => (HttpMethod::Post, doc_type.to_string()),
        };
        self.api.request(method, &endpoint, Some(body)).await
    }

    /// Apply a partial update to an existing document.
    pub async fn update<T>(&self, doc_type: &str, id: &str, body: &T) -> Result<Payload, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.api
            .request(HttpMethod::Post, &format!("{doc_type}/{id}/_update"), Some(body))
            .await
    }

    /// Delete a typed document by id.
    pub async fn delete(&self, doc_type: &str, id: &str) -> Result<Payload, ApiError> {
        self.api
            .request::<serde_json::Value>(HttpMethod::Delete, &format!("{doc_type}/{id}/"), None)
            .await
    }

    /// Batch many index/update/delete entries into a single call.
    ///
    /// `doc_types` are joined with commas to form the endpoint; an empty
    /// list targets `_bulk` directly. `entries` travel as a JSON array in
    /// the request body.
    pub async fn bulk<T>(&self, doc_types: &[&str], entries: &[T]) -> Result<Payload, ApiError>
    where
        T: Serialize,
    {
        let endpoint = if doc_types.is_empty() {
            "_bulk".to_string()
        } else {
            format!("{}/_bulk", doc_types.join(","))
        };
        self.api
            .request(HttpMethod::Post, &endpoint, Some(entries))
            .await
    }
}
