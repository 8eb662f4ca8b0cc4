//! Document aggregate model and the persistence boundary for LexVault.
//!
//! One [`DocumentAggregate`] per case holds every encrypted document the
//! case carries, bucketed by category, plus a free-form status string
//! per category. Aggregates mutate only through whole-batch commits: a
//! reader never observes a half-applied ingestion.
//!
//! Durable storage itself lives behind [`DocumentStore`]; the in-memory
//! implementation here is the reference for the commit/cascade semantics
//! any durable backend must provide.

mod aggregate;
mod error;
mod store;

pub use aggregate::{
    CategoryDocuments, DocumentAggregate, DocumentEntity, DocumentListing, IngestBatch,
};
pub use error::{StorageError, StorageResult};
pub use store::{DocumentStore, MemoryDocumentStore};
