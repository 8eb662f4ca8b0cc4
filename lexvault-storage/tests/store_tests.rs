use lexvault_crypto::EncryptedPayload;
use lexvault_storage::{
    CategoryDocuments, DocumentEntity, DocumentStore, IngestBatch, MemoryDocumentStore,
    StorageError,
};
use lexvault_types::{CaseId, Category};
use pretty_assertions::assert_eq;

fn payload(fill: u8) -> EncryptedPayload {
    EncryptedPayload {
        ciphertext: vec![fill; 48],
        wrapped_key: vec![fill; 256],
        iv: [fill; 12],
    }
}

fn doc(case_id: CaseId, category: Category, name: &str) -> DocumentEntity {
    DocumentEntity::new(case_id, category, name, "application/pdf", payload(0x42))
}

fn batch(entries: Vec<(Category, Vec<DocumentEntity>, Option<&str>)>) -> IngestBatch {
    IngestBatch {
        per_category: entries
            .into_iter()
            .map(|(category, documents, status)| CategoryDocuments {
                category,
                documents,
                status: status.map(String::from),
            })
            .collect(),
    }
}

#[test]
fn ensure_for_case_is_idempotent() {
    let store = MemoryDocumentStore::new();
    let case_id = CaseId::new();

    let first = store.ensure_for_case(case_id).unwrap();
    let second = store.ensure_for_case(case_id).unwrap();
    assert_eq!(first, second);

    let agg = store.load(case_id).unwrap().unwrap();
    assert!(agg.is_empty());
}

#[test]
fn load_unknown_case_returns_none() {
    let store = MemoryDocumentStore::new();
    assert!(store.load(CaseId::new()).unwrap().is_none());
}

#[test]
fn commit_batch_appends_and_sets_status() {
    let store = MemoryDocumentStore::new();
    let case_id = CaseId::new();

    store
        .commit_batch(
            case_id,
            batch(vec![
                (
                    Category::Contract,
                    vec![doc(case_id, Category::Contract, "c1.pdf"), doc(case_id, Category::Contract, "c2.pdf")],
                    Some("pending"),
                ),
                (
                    Category::InitialPetition,
                    vec![doc(case_id, Category::InitialPetition, "p1.pdf")],
                    None,
                ),
            ]),
        )
        .unwrap();

    let agg = store.load(case_id).unwrap().unwrap();
    assert_eq!(agg.len(), 3);
    assert_eq!(
        agg.status_by_category.get(&Category::Contract).unwrap(),
        "pending"
    );

    let names: Vec<_> = agg
        .documents_in(Category::Contract)
        .iter()
        .map(|d| d.original_filename.clone())
        .collect();
    assert_eq!(names, ["c1.pdf", "c2.pdf"]);
}

#[test]
fn second_batch_keeps_prior_documents() {
    let store = MemoryDocumentStore::new();
    let case_id = CaseId::new();

    store
        .commit_batch(
            case_id,
            batch(vec![(
                Category::Contract,
                vec![doc(case_id, Category::Contract, "first.pdf")],
                None,
            )]),
        )
        .unwrap();
    store
        .commit_batch(
            case_id,
            batch(vec![(
                Category::PowerOfAttorney,
                vec![doc(case_id, Category::PowerOfAttorney, "poa.pdf")],
                None,
            )]),
        )
        .unwrap();

    let agg = store.load(case_id).unwrap().unwrap();
    assert_eq!(agg.documents_in(Category::Contract).len(), 1);
    assert_eq!(agg.documents_in(Category::PowerOfAttorney).len(), 1);
}

#[test]
fn find_document_returns_stored_payload() {
    let store = MemoryDocumentStore::new();
    let case_id = CaseId::new();
    let entity = doc(case_id, Category::Supplementary, "exhibit.pdf");
    let id = entity.id;

    store
        .commit_batch(
            case_id,
            batch(vec![(Category::Supplementary, vec![entity], None)]),
        )
        .unwrap();

    let found = store.find_document(id).unwrap().unwrap();
    assert_eq!(found.original_filename, "exhibit.pdf");
    assert_eq!(found.payload.ciphertext, vec![0x42; 48]);
}

#[test]
fn find_unknown_document_returns_none() {
    let store = MemoryDocumentStore::new();
    assert!(store
        .find_document(lexvault_types::DocumentId::new())
        .unwrap()
        .is_none());
}

#[test]
fn commit_rejects_cross_case_documents() {
    let store = MemoryDocumentStore::new();
    let case_a = CaseId::new();
    let case_b = CaseId::new();

    let err = store
        .commit_batch(
            case_a,
            batch(vec![(
                Category::Contract,
                vec![doc(case_b, Category::Contract, "stray.pdf")],
                None,
            )]),
        )
        .unwrap_err();
    assert!(matches!(err, StorageError::CommitFailed(_)));

    // Nothing from the rejected batch is visible
    assert!(store.load(case_a).unwrap().is_none());
}

#[test]
fn set_status_requires_existing_case() {
    let store = MemoryDocumentStore::new();
    let err = store
        .set_status(CaseId::new(), Category::Contract, "complete")
        .unwrap_err();
    assert!(matches!(err, StorageError::CaseNotFound(_)));
}

#[test]
fn delete_case_cascades_to_documents() {
    let store = MemoryDocumentStore::new();
    let case_id = CaseId::new();
    let entity = doc(case_id, Category::Contract, "contract.pdf");
    let id = entity.id;

    store
        .commit_batch(case_id, batch(vec![(Category::Contract, vec![entity], None)]))
        .unwrap();
    store.delete_case(case_id).unwrap();

    assert!(store.load(case_id).unwrap().is_none());
    assert!(store.find_document(id).unwrap().is_none());
}

#[test]
fn delete_unknown_case_errors() {
    let store = MemoryDocumentStore::new();
    assert!(matches!(
        store.delete_case(CaseId::new()).unwrap_err(),
        StorageError::CaseNotFound(_)
    ));
}

#[test]
fn listing_reflects_committed_state() {
    let store = MemoryDocumentStore::new();
    let case_id = CaseId::new();

    store
        .commit_batch(
            case_id,
            batch(vec![(
                Category::Contract,
                vec![doc(case_id, Category::Contract, "contract.pdf")],
                Some("complete"),
            )]),
        )
        .unwrap();

    let listing = store.load(case_id).unwrap().unwrap().listing();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].status.as_deref(), Some("complete"));
}
