//! Error types for the mining engine.

use thiserror::Error;

/// Configuration validation failures.
///
/// Rejected before any session is processed — a bad option is a single
/// fatal failure for the whole run, never a per-bucket condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ngram_max must be at least 1, got {0}")]
    NgramMax(usize),

    #[error("min_support must be at least 1, got {0}")]
    MinSupport(u64),

    #[error("top_k must be at least 1, got {0}")]
    TopK(usize),

    #[error("chunk_size must be at least 1 when set")]
    ChunkSize,
}

/// Failures surfaced by a mining run.
#[derive(Debug, Error)]
pub enum MiningError {
    #[error("invalid mining configuration: {0}")]
    Config(#[from] ConfigError),
}
