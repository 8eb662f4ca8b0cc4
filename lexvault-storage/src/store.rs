//! The persistence boundary and its in-memory reference implementation.

use crate::aggregate::{DocumentAggregate, DocumentEntity, IngestBatch};
use crate::error::{StorageError, StorageResult};
use lexvault_types::{AggregateId, CaseId, Category, DocumentId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Durable storage for document aggregates.
///
/// The contract the pipeline and retrieval rely on:
/// - `commit_batch` applies a whole ingestion atomically — concurrent
///   readers see the aggregate either before or after the batch, never
///   in between;
/// - `delete_case` cascades to the aggregate and every document in it,
///   leaving no orphaned encrypted blobs;
/// - stored payloads are returned as-is, never mutated by reads.
pub trait DocumentStore: Send + Sync {
    /// Returns the aggregate id for a case, creating an empty aggregate
    /// on first use. Idempotent.
    fn ensure_for_case(&self, case_id: CaseId) -> StorageResult<AggregateId>;

    /// Loads a case's aggregate, `None` if the case has never ingested.
    fn load(&self, case_id: CaseId) -> StorageResult<Option<DocumentAggregate>>;

    /// Looks up a single document by id.
    fn find_document(&self, id: DocumentId) -> StorageResult<Option<DocumentEntity>>;

    /// Applies a fully built batch to the case's aggregate as one unit.
    fn commit_batch(&self, case_id: CaseId, batch: IngestBatch) -> StorageResult<()>;

    /// Overwrites one category's status outside of a batch.
    fn set_status(&self, case_id: CaseId, category: Category, status: &str) -> StorageResult<()>;

    /// Deletes a case's aggregate and all its documents.
    fn delete_case(&self, case_id: CaseId) -> StorageResult<()>;
}

#[derive(Default)]
struct Inner {
    aggregates: HashMap<CaseId, DocumentAggregate>,
    /// Secondary index for document lookup by id.
    document_index: HashMap<DocumentId, CaseId>,
}

/// In-memory store. One `RwLock` is the commit point: a batch becomes
/// visible in a single write-lock critical section.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn ensure_for_case(&self, case_id: CaseId) -> StorageResult<AggregateId> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let agg = inner
            .aggregates
            .entry(case_id)
            .or_insert_with(|| DocumentAggregate::new(case_id));
        Ok(agg.id)
    }

    fn load(&self, case_id: CaseId) -> StorageResult<Option<DocumentAggregate>> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.aggregates.get(&case_id).cloned())
    }

    fn find_document(&self, id: DocumentId) -> StorageResult<Option<DocumentEntity>> {
        let inner = self.inner.read().expect("store lock poisoned");
        let Some(case_id) = inner.document_index.get(&id) else {
            return Ok(None);
        };
        let doc = inner
            .aggregates
            .get(case_id)
            .and_then(|agg| agg.iter_documents().find(|d| d.id == id))
            .cloned();
        Ok(doc)
    }

    fn commit_batch(&self, case_id: CaseId, batch: IngestBatch) -> StorageResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut inner = self.inner.write().expect("store lock poisoned");

        // Index updates and aggregate mutation happen under the same
        // write guard, so the batch is all-or-nothing for readers.
        let mut index_entries = Vec::with_capacity(batch.len());
        for cat in &batch.per_category {
            for doc in &cat.documents {
                if doc.case_id != case_id {
                    return Err(StorageError::CommitFailed(format!(
                        "document {} belongs to case {}, not {case_id}",
                        doc.id, doc.case_id
                    )));
                }
                index_entries.push(doc.id);
            }
        }

        let agg = inner
            .aggregates
            .entry(case_id)
            .or_insert_with(|| DocumentAggregate::new(case_id));
        for cat in batch.per_category {
            agg.append_category(cat.category, cat.documents);
            if let Some(status) = cat.status {
                agg.set_status(cat.category, status);
            }
        }

        for id in index_entries {
            inner.document_index.insert(id, case_id);
        }
        Ok(())
    }

    fn set_status(&self, case_id: CaseId, category: Category, status: &str) -> StorageResult<()> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let agg = inner
            .aggregates
            .get_mut(&case_id)
            .ok_or(StorageError::CaseNotFound(case_id))?;
        agg.set_status(category, status);
        Ok(())
    }

    fn delete_case(&self, case_id: CaseId) -> StorageResult<()> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let Some(agg) = inner.aggregates.remove(&case_id) else {
            return Err(StorageError::CaseNotFound(case_id));
        };
        // Cascade: drop every document's index entry with the aggregate.
        for doc in agg.iter_documents() {
            inner.document_index.remove(&doc.id);
        }
        Ok(())
    }
}
