//! # goldenpath-mining
//!
//! Mining engine for "golden paths": frequent, bucket-scoped navigation
//! sequences correlated with successful outcomes. Normalizes per-session
//! paths, extracts contiguous n-grams, aggregates support/success counts
//! per (period, store) bucket via a parallel map/reduce, and selects a
//! deterministic top-K ranking per bucket.

pub mod assemble;
pub mod bucket;
pub mod ingest;
pub mod ngram;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod segment;
pub mod types;

pub use goldenpath_core::{CancellationToken, ConfigError, MiningConfig, MiningError};
pub use pipeline::{mine, MiningPipeline};
pub use types::{
    BucketResult, GoldenPathItem, ItemPaths, MiningOutcome, MiningStats, MiningStatus,
    PeriodType, RawSessionPath,
};
