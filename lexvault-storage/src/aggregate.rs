//! The per-case document aggregate.

use chrono::{DateTime, Utc};
use lexvault_crypto::EncryptedPayload;
use lexvault_types::{AggregateId, CaseId, Category, DocumentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stored document: encrypted body plus plaintext metadata.
///
/// Immutable after creation. Owned by exactly one aggregate; removed only
/// when its case is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntity {
    pub id: DocumentId,
    pub case_id: CaseId,
    pub category: Category,
    pub original_filename: String,
    pub mime_type: String,
    pub payload: EncryptedPayload,
    pub created_at: DateTime<Utc>,
}

impl DocumentEntity {
    pub fn new(
        case_id: CaseId,
        category: Category,
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
        payload: EncryptedPayload,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            case_id,
            category,
            original_filename: original_filename.into(),
            mime_type: mime_type.into(),
            payload,
            created_at: Utc::now(),
        }
    }
}

/// Metadata-only view of a document for case listings.
///
/// Carries no ciphertext and requires no key; this is what the case view
/// renders before the owner decides to decrypt anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListing {
    pub id: DocumentId,
    pub category: Category,
    pub original_filename: String,
    pub mime_type: String,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything one case has attached: documents bucketed by category plus
/// per-category status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAggregate {
    pub id: AggregateId,
    pub case_id: CaseId,
    /// Status per category, free-form caller strings ("pending",
    /// "complete", ...). An entry exists for every category that has ever
    /// received a document.
    pub status_by_category: HashMap<Category, String>,
    /// Documents per category, in submission order.
    documents: HashMap<Category, Vec<DocumentEntity>>,
}

impl DocumentAggregate {
    /// Creates an empty aggregate for a case.
    pub fn new(case_id: CaseId) -> Self {
        Self {
            id: AggregateId::new(),
            case_id,
            status_by_category: HashMap::new(),
            documents: HashMap::new(),
        }
    }

    /// Appends documents into a category bucket, preserving submission
    /// order. Never touches sibling categories.
    pub fn append_category(&mut self, category: Category, docs: Vec<DocumentEntity>) {
        if docs.is_empty() {
            return;
        }
        self.status_by_category.entry(category).or_default();
        self.documents.entry(category).or_default().extend(docs);
    }

    /// Overwrites the status for a category.
    pub fn set_status(&mut self, category: Category, status: impl Into<String>) {
        self.status_by_category.insert(category, status.into());
    }

    /// Documents in one category, submission order.
    pub fn documents_in(&self, category: Category) -> &[DocumentEntity] {
        self.documents.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All documents across categories.
    pub fn iter_documents(&self) -> impl Iterator<Item = &DocumentEntity> {
        Category::ALL
            .iter()
            .flat_map(|cat| self.documents_in(*cat).iter())
    }

    /// Total document count.
    pub fn len(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata listing for the case view, category order then submission
    /// order.
    pub fn listing(&self) -> Vec<DocumentListing> {
        self.iter_documents()
            .map(|doc| DocumentListing {
                id: doc.id,
                category: doc.category,
                original_filename: doc.original_filename.clone(),
                mime_type: doc.mime_type.clone(),
                status: self.status_by_category.get(&doc.category).cloned(),
                created_at: doc.created_at,
            })
            .collect()
    }
}

/// A fully built ingestion batch, applied to an aggregate as one unit.
///
/// The pipeline assembles the whole batch off to the side and hands it to
/// the store only when every category succeeded; a failed batch is simply
/// dropped.
#[derive(Debug, Default)]
pub struct IngestBatch {
    pub per_category: Vec<CategoryDocuments>,
}

/// One category's contribution to a batch.
#[derive(Debug)]
pub struct CategoryDocuments {
    pub category: Category,
    pub documents: Vec<DocumentEntity>,
    /// Status set atomically with the commit, if supplied by the caller.
    pub status: Option<String>,
}

impl IngestBatch {
    pub fn len(&self) -> usize {
        self.per_category.iter().map(|c| c.documents.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexvault_crypto::EncryptedPayload;

    fn dummy_payload() -> EncryptedPayload {
        EncryptedPayload {
            ciphertext: vec![0xAA; 32],
            wrapped_key: vec![0xBB; 256],
            iv: [0u8; 12],
        }
    }

    fn doc(case_id: CaseId, category: Category, name: &str) -> DocumentEntity {
        DocumentEntity::new(case_id, category, name, "application/pdf", dummy_payload())
    }

    #[test]
    fn append_preserves_order_and_siblings() {
        let case_id = CaseId::new();
        let mut agg = DocumentAggregate::new(case_id);

        agg.append_category(
            Category::Contract,
            vec![doc(case_id, Category::Contract, "a.pdf"), doc(case_id, Category::Contract, "b.pdf")],
        );
        agg.append_category(
            Category::PowerOfAttorney,
            vec![doc(case_id, Category::PowerOfAttorney, "poa.pdf")],
        );
        agg.append_category(Category::Contract, vec![doc(case_id, Category::Contract, "c.pdf")]);

        let names: Vec<_> = agg
            .documents_in(Category::Contract)
            .iter()
            .map(|d| d.original_filename.as_str())
            .collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(agg.documents_in(Category::PowerOfAttorney).len(), 1);
        assert_eq!(agg.len(), 4);
    }

    #[test]
    fn appending_creates_status_entry() {
        let case_id = CaseId::new();
        let mut agg = DocumentAggregate::new(case_id);
        agg.append_category(Category::Contract, vec![doc(case_id, Category::Contract, "a.pdf")]);

        assert!(agg.status_by_category.contains_key(&Category::Contract));

        agg.set_status(Category::Contract, "complete");
        assert_eq!(
            agg.status_by_category.get(&Category::Contract).unwrap(),
            "complete"
        );
    }

    #[test]
    fn empty_append_is_a_noop() {
        let mut agg = DocumentAggregate::new(CaseId::new());
        agg.append_category(Category::Contract, vec![]);
        assert!(agg.is_empty());
        assert!(agg.status_by_category.is_empty());
    }

    #[test]
    fn listing_carries_status_and_no_payload() {
        let case_id = CaseId::new();
        let mut agg = DocumentAggregate::new(case_id);
        agg.append_category(Category::Contract, vec![doc(case_id, Category::Contract, "a.pdf")]);
        agg.set_status(Category::Contract, "pending");

        let listing = agg.listing();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].status.as_deref(), Some("pending"));
        assert_eq!(listing[0].original_filename, "a.pdf");
    }
}
