//! The concurrent ingestion pipeline.
//!
//! One concurrent unit per non-empty category: categories are independent
//! (a power-of-attorney never orders against a contract), so wall-clock
//! latency is bounded by the slowest category instead of the sum of all
//! of them. Within a category files are processed strictly in submission
//! order, one plaintext/ciphertext buffer in flight per worker.
//!
//! The batch is all-or-nothing: the aggregate is only touched after every
//! category finished, in a single atomic commit. A failure in any
//! category discards all sibling results.

use crate::config::PipelineConfig;
use crate::error::{CategoryFailure, IngestError, IngestResult};
use crate::indexer::DocumentIndexer;
use lexvault_crypto::{self as crypto, CryptoError, PublicKeyHandle};
use lexvault_storage::{CategoryDocuments, DocumentEntity, DocumentStore, IngestBatch};
use lexvault_types::{CaseId, Category, UploadedFile};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// One category's uploads for a batch.
#[derive(Debug)]
pub struct CategoryUpload {
    pub category: Category,
    pub files: Vec<UploadedFile>,
    /// Status applied to the category with the same commit.
    pub status: Option<String>,
}

/// Summary of a committed batch.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub case_id: CaseId,
    pub documents_ingested: usize,
    pub per_category: Vec<(Category, usize)>,
}

/// Encrypt-and-commit orchestrator for case document uploads.
pub struct IngestionPipeline {
    store: Arc<dyn DocumentStore>,
    indexer: Arc<dyn DocumentIndexer>,
    config: PipelineConfig,
    /// Bounds concurrent encryptions across all categories. The pipeline
    /// never closes this semaphore.
    encrypt_permits: Arc<Semaphore>,
}

impl IngestionPipeline {
    pub fn new(store: Arc<dyn DocumentStore>, indexer: Arc<dyn DocumentIndexer>) -> Self {
        Self::with_config(store, indexer, PipelineConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        indexer: Arc<dyn DocumentIndexer>,
        config: PipelineConfig,
    ) -> Self {
        let encrypt_permits = Arc::new(Semaphore::new(config.max_concurrent_encryptions.max(1)));
        Self {
            store,
            indexer,
            config,
            encrypt_permits,
        }
    }

    /// Ingests one batch of uploads for a case.
    ///
    /// The public key is validated before any file is touched. On any
    /// failure no partial state is committed and the error names the
    /// failing category and cause.
    pub async fn ingest(
        &self,
        case_id: CaseId,
        recipient_public_key_der: &[u8],
        uploads: Vec<CategoryUpload>,
        index_namespace: &str,
    ) -> IngestResult<IngestReport> {
        let recipient =
            crypto::parse_public_key(recipient_public_key_der).map_err(IngestError::Key)?;

        // One worker per category: duplicate entries must be merged first
        // or they would race on the same bucket and break submission order.
        let uploads: Vec<CategoryUpload> = merge_by_category(uploads)
            .into_iter()
            .filter(|u| !u.files.is_empty())
            .collect();

        if uploads.is_empty() {
            self.store.ensure_for_case(case_id)?;
            return Ok(IngestReport {
                case_id,
                documents_ingested: 0,
                per_category: Vec::new(),
            });
        }

        info!(
            %case_id,
            categories = uploads.len(),
            files = uploads.iter().map(|u| u.files.len()).sum::<usize>(),
            "starting ingestion"
        );

        let mut workers: JoinSet<Result<CategoryDocuments, (Category, CategoryFailure)>> =
            JoinSet::new();
        for upload in uploads {
            workers.spawn(process_category(
                case_id,
                upload,
                recipient.clone(),
                Arc::clone(&self.indexer),
                Arc::clone(&self.encrypt_permits),
                index_namespace.to_string(),
            ));
        }

        let timeout = self.config.ingest_timeout;
        let batch = match tokio::time::timeout(timeout, drain_workers(&mut workers)).await {
            Ok(result) => result?,
            Err(_) => {
                workers.abort_all();
                warn!(%case_id, ?timeout, "ingestion timed out; discarding batch");
                return Err(IngestError::Timeout(timeout));
            }
        };

        let per_category: Vec<(Category, usize)> = batch
            .per_category
            .iter()
            .map(|c| (c.category, c.documents.len()))
            .collect();
        let documents_ingested = batch.len();

        // Single commit point: readers see the whole batch or none of it.
        self.store.commit_batch(case_id, batch)?;

        info!(%case_id, documents = documents_ingested, "ingestion committed");
        Ok(IngestReport {
            case_id,
            documents_ingested,
            per_category,
        })
    }
}

/// Collapses duplicate category entries into one upload each, appending
/// files in submission order. For statuses the last supplied value wins.
fn merge_by_category(uploads: Vec<CategoryUpload>) -> Vec<CategoryUpload> {
    let mut merged: Vec<CategoryUpload> = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match merged.iter_mut().find(|m| m.category == upload.category) {
            Some(existing) => {
                existing.files.extend(upload.files);
                if upload.status.is_some() {
                    existing.status = upload.status;
                }
            }
            None => merged.push(upload),
        }
    }
    merged
}

/// Joins every category worker. On the first failure, aborts and drains
/// the siblings, discarding whatever they produced.
async fn drain_workers(
    workers: &mut JoinSet<Result<CategoryDocuments, (Category, CategoryFailure)>>,
) -> IngestResult<IngestBatch> {
    let mut per_category = Vec::new();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Ok(docs)) => per_category.push(docs),
            Ok(Err((category, failure))) => {
                workers.abort_all();
                while workers.join_next().await.is_some() {}
                warn!(%category, %failure, "category failed; discarding batch");
                return Err(IngestError::Category { category, failure });
            }
            Err(join_err) => {
                workers.abort_all();
                while workers.join_next().await.is_some() {}
                return Err(IngestError::Worker(join_err.to_string()));
            }
        }
    }
    Ok(IngestBatch { per_category })
}

/// Encrypts one category's files sequentially and forwards plaintext to
/// the indexer. Runs as one unit of the worker pool.
async fn process_category(
    case_id: CaseId,
    upload: CategoryUpload,
    recipient: PublicKeyHandle,
    indexer: Arc<dyn DocumentIndexer>,
    permits: Arc<Semaphore>,
    namespace: String,
) -> Result<CategoryDocuments, (Category, CategoryFailure)> {
    let category = upload.category;
    let mut documents = Vec::with_capacity(upload.files.len());

    for file in upload.files {
        let filename = file.filename.clone();

        // Encryption is CPU-bound: run it on the blocking pool, bounded
        // by the shared permit budget. The content key lives and dies
        // inside the encrypt call.
        let permit = Arc::clone(&permits)
            .acquire_owned()
            .await
            .expect("encryption semaphore closed");
        let recipient = recipient.clone();
        let encrypted: Result<(UploadedFile, _), CryptoError> =
            tokio::task::spawn_blocking(move || {
                let payload = crypto::encrypt(&file.bytes, &recipient)?;
                Ok((file, payload))
            })
            .await
            .map_err(|e| {
                (
                    category,
                    CategoryFailure::Encrypt {
                        filename: filename.clone(),
                        source: CryptoError::Encryption(format!("encryption worker died: {e}")),
                    },
                )
            })?;
        drop(permit);

        let (file, payload) = encrypted.map_err(|source| {
            (
                category,
                CategoryFailure::Encrypt {
                    filename: filename.clone(),
                    source,
                },
            )
        })?;

        // Plaintext goes to the search index while we still hold it;
        // only ciphertext continues toward storage.
        let display_name = format!("{}/{}", category, file.filename);
        indexer
            .index(&display_name, &file.bytes, &namespace)
            .await
            .map_err(|source| {
                (
                    category,
                    CategoryFailure::Index {
                        filename: file.filename.clone(),
                        source,
                    },
                )
            })?;

        debug!(%case_id, %category, filename = %file.filename, "file encrypted");
        documents.push(DocumentEntity::new(
            case_id,
            category,
            file.filename,
            file.mime_type,
            payload,
        ));
    }

    Ok(CategoryDocuments {
        category,
        documents,
        status: upload.status,
    })
}
