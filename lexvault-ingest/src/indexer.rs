//! The document-indexing collaborator boundary.
//!
//! The indexing service receives plaintext copies of uploaded files so the
//! owner can search across their documents. It sees plaintext by design —
//! it is a trusted collaborator outside the encrypted store — but it is
//! only ever called during ingestion, never fed from storage.

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors from the indexing collaborator.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("index request failed: {0}")]
    Http(String),

    #[error("index service rejected upload: HTTP {status}")]
    Rejected { status: u16 },
}

/// Accepts one file's plaintext for semantic indexing.
///
/// `namespace` scopes the upload to one owner's index (one vector store
/// per lawyer); `display_name` is the human-readable handle shown in
/// search results.
#[async_trait]
pub trait DocumentIndexer: Send + Sync {
    async fn index(
        &self,
        display_name: &str,
        plaintext: &[u8],
        namespace: &str,
    ) -> Result<(), IndexerError>;
}

/// No-op indexer for deployments without search and for tests.
pub struct NullIndexer;

#[async_trait]
impl DocumentIndexer for NullIndexer {
    async fn index(
        &self,
        _display_name: &str,
        _plaintext: &[u8],
        _namespace: &str,
    ) -> Result<(), IndexerError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct IndexUpload<'a> {
    display_name: &'a str,
    namespace: &'a str,
    content_b64: String,
}

/// HTTP client for the external indexing service.
pub struct HttpIndexer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIndexer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: std::time::Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl DocumentIndexer for HttpIndexer {
    async fn index(
        &self,
        display_name: &str,
        plaintext: &[u8],
        namespace: &str,
    ) -> Result<(), IndexerError> {
        let url = format!("{}/files", self.base_url.trim_end_matches('/'));
        let body = IndexUpload {
            display_name,
            namespace,
            content_b64: base64::engine::general_purpose::STANDARD.encode(plaintext),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexerError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexerError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(display_name, namespace, bytes = plaintext.len(), "indexed document");
        Ok(())
    }
}
