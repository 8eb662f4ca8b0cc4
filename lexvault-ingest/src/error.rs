//! Ingestion and retrieval error types.
//!
//! Errors carry enough context for a client-visible message (category,
//! filename) but never key material or plaintext.

use crate::indexer::IndexerError;
use lexvault_crypto::CryptoError;
use lexvault_storage::StorageError;
use lexvault_types::{Category, DocumentId};
use std::time::Duration;
use thiserror::Error;

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Result type for retrieval.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Errors that fail a whole ingestion batch.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The recipient public key was rejected before any file was touched.
    #[error("recipient public key rejected: {0}")]
    Key(#[source] CryptoError),

    /// One category failed; the whole batch was discarded.
    #[error("category {category} failed: {failure}")]
    Category {
        category: Category,
        #[source]
        failure: CategoryFailure,
    },

    /// The ingest call exceeded its wall-clock bound.
    #[error("ingestion timed out after {0:?}")]
    Timeout(Duration),

    /// A category worker panicked or was torn down mid-flight.
    #[error("category worker failed: {0}")]
    Worker(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// What went wrong inside a single category's worker.
#[derive(Debug, Error)]
pub enum CategoryFailure {
    /// Encryption is deterministic; this is never retried.
    #[error("encrypting '{filename}' failed: {source}")]
    Encrypt {
        filename: String,
        #[source]
        source: CryptoError,
    },

    /// The indexing collaborator refused or dropped the upload.
    #[error("indexing '{filename}' failed: {source}")]
    Index {
        filename: String,
        #[source]
        source: IndexerError,
    },
}

/// Errors from decrypt-on-read.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// No private key is active in the current request scope. The caller
    /// must resupply the key; nothing is ever decrypted without one.
    #[error("no private key supplied with this request")]
    MissingKey,

    /// Wrong key or tampered payload — deliberately indistinguishable.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
