//! Decrypt-on-read.

use crate::error::{RetrievalError, RetrievalResult};
use lexvault_crypto::{self as crypto, SecretScope};
use lexvault_storage::{DocumentListing, DocumentStore};
use lexvault_types::{CaseId, DocumentId};
use std::sync::Arc;
use tracing::debug;

/// Read side of the vault: looks up a document and decrypts it with the
/// private key bound to the current request scope.
pub struct RetrievalService {
    store: Arc<dyn DocumentStore>,
}

impl RetrievalService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Decrypts one document for the caller.
    ///
    /// Requires an active [`SecretScope`]; fails with `MissingKey` when
    /// none is bound, never with a silent fallback. Returns a fresh
    /// plaintext buffer — the stored payload is never mutated or cached
    /// in decrypted form.
    pub fn decrypt_document(&self, id: DocumentId) -> RetrievalResult<Vec<u8>> {
        let entity = self
            .store
            .find_document(id)?
            .ok_or(RetrievalError::NotFound(id))?;

        let key = SecretScope::current().ok_or(RetrievalError::MissingKey)?;

        let plaintext = crypto::decrypt(&entity.payload, &key)?;
        debug!(%id, category = %entity.category, "document decrypted");
        Ok(plaintext)
    }

    /// Metadata listing for a case — no key needed, no ciphertext
    /// returned.
    pub fn document_listing(&self, case_id: CaseId) -> RetrievalResult<Vec<DocumentListing>> {
        let aggregate = self
            .store
            .load(case_id)?
            .ok_or(RetrievalError::Storage(
                lexvault_storage::StorageError::CaseNotFound(case_id),
            ))?;
        Ok(aggregate.listing())
    }
}
