//! Input and output types for the mining engine.
//!
//! Output field names follow the dashboard wire contract exactly
//! (`period_type`/`period_start`/`store_id` snake_case, session counters
//! and per-item keys camelCase), so serialized results are drop-in for
//! the existing presentation layer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregation period granularity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Weekly,
    Monthly,
    Yearly,
}

impl PeriodType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One observed session as returned by the warehouse, read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSessionPath {
    /// Period granularity of the bucket this session falls into.
    pub period_type: PeriodType,
    /// Bucket start date, ISO `YYYY-MM-DD`.
    pub period_start: String,
    /// Store identifier; `None` for store-agnostic rows.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Ordered navigation tokens visited in the session. May be empty.
    pub path: Vec<String>,
    /// Items purchased in the session, when the warehouse provides them.
    #[serde(default)]
    pub purchased_items: Vec<String>,
    /// Embedded success signal, when the warehouse provides one.
    #[serde(default)]
    pub is_successful: Option<bool>,
}

/// One ranked golden path for a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenPathItem {
    /// The token sequence.
    pub sequence: Vec<String>,
    /// Number of distinct sessions containing the sequence.
    pub support: u64,
    /// Fraction of supporting sessions that were successful, in [0, 1].
    #[serde(rename = "successRate")]
    pub success_rate: f64,
    /// Support divided by the bucket's total sessions, in [0, 1].
    pub coverage: f64,
}

/// Golden paths mined from the sessions that purchased one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPaths {
    /// The purchased item.
    pub item: String,
    /// Sessions in the bucket that purchased the item.
    #[serde(rename = "totalSessions")]
    pub total_sessions: u64,
    /// Ranked paths among those sessions.
    pub top: Vec<GoldenPathItem>,
}

/// The mined output for one (period_type, period_start, store_id) bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketResult {
    pub period_type: PeriodType,
    pub period_start: String,
    pub store_id: Option<String>,
    #[serde(rename = "totalSessions")]
    pub total_sessions: u64,
    #[serde(rename = "successSessions")]
    pub success_sessions: u64,
    /// Ranked golden paths, at most `top_k` entries.
    pub top: Vec<GoldenPathItem>,
    /// Per-purchased-item breakdown, present when `by_purchased_top > 0`.
    #[serde(rename = "topByItem", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub top_by_item: Option<Vec<ItemPaths>>,
}

/// Completion status of a mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningStatus {
    /// Every chunk was mapped and merged.
    Complete,
    /// Cancellation was observed; skipped chunks contributed nothing.
    Partial { chunks_skipped: usize },
}

impl MiningStatus {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }
}

/// Counters and timing for one mining run.
#[derive(Debug, Clone)]
pub struct MiningStats {
    /// Sessions in the input batch.
    pub sessions_total: usize,
    /// Sessions actually mapped (less than total after cancellation).
    pub sessions_processed: usize,
    /// Distinct buckets produced.
    pub buckets: usize,
    /// Map-phase chunks.
    pub chunks: usize,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Everything a mining run returns.
#[derive(Debug)]
pub struct MiningOutcome {
    /// One result per bucket, deterministically ordered.
    pub buckets: Vec<BucketResult>,
    pub stats: MiningStats,
    pub status: MiningStatus,
}
