//! Ingestion and retrieval services for LexVault.
//!
//! [`IngestionPipeline`] takes a case's uploads, encrypts every file under
//! the owner's public key (one concurrent unit per category), forwards
//! plaintext to the indexing collaborator, and commits the whole batch
//! atomically — any failure anywhere discards everything.
//!
//! [`RetrievalService`] is the read side: given a document id and the
//! private key bound to the current request scope, it unwraps the content
//! key and returns fresh plaintext.

mod config;
mod error;
mod indexer;
mod pipeline;
mod retrieval;

pub use config::PipelineConfig;
pub use error::{CategoryFailure, IngestError, IngestResult, RetrievalError, RetrievalResult};
pub use indexer::{DocumentIndexer, HttpIndexer, IndexerError, NullIndexer};
pub use pipeline::{CategoryUpload, IngestReport, IngestionPipeline};
pub use retrieval::RetrievalService;
