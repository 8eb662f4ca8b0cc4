//! Pipeline configuration.

use std::time::Duration;

/// Tuning knobs for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on encryptions running at once across all categories.
    /// Encryption is CPU-bound; more permits than cores just thrashes.
    pub max_concurrent_encryptions: usize,
    /// Wall-clock bound on one whole ingest call. A stalled indexing
    /// upload must not hold the batch open forever.
    pub ingest_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            // Small multiplier: categories interleave CPU-bound encryption
            // with I/O-bound index uploads.
            max_concurrent_encryptions: parallelism * 2,
            ingest_timeout: Duration::from_secs(120),
        }
    }
}
