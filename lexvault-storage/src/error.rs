//! Storage error types.

use lexvault_types::CaseId;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from the document store. Plain lookup misses are `Ok(None)`,
/// not errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no aggregate for case {0}")]
    CaseNotFound(CaseId),

    /// A batch referenced a case the commit could not resolve, or the
    /// backend rejected the write. The batch is discarded as a unit.
    #[error("batch commit failed: {0}")]
    CommitFailed(String),
}
