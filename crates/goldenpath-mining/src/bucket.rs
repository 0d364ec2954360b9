//! Per-bucket aggregation: keys, n-gram statistics, and the mergeable
//! accumulator that underpins parallel mining.

use goldenpath_core::types::collections::{FxHashMap, FxHashSet};

use crate::ngram::Ngram;
use crate::types::{PeriodType, RawSessionPath};

/// Aggregation scope: (period_type, period_start, store_id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub period_type: PeriodType,
    pub period_start: String,
    pub store_id: Option<String>,
}

impl BucketKey {
    pub fn of(session: &RawSessionPath) -> Self {
        Self {
            period_type: session.period_type,
            period_start: session.period_start.clone(),
            store_id: session.store_id.clone(),
        }
    }
}

/// Counters for one n-gram within one bucket.
///
/// Invariant: `0 <= success <= support <= total_sessions` of the owning
/// accumulator. `support` counts sessions containing the n-gram at least
/// once; `success` counts the successful ones among them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NgramStats {
    pub support: u64,
    pub success: u64,
}

/// Monotonic per-bucket aggregator.
///
/// Created lazily when the first session for its key arrives, mutated
/// only by the record/merge operations below, then read-only once
/// ranking begins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketAccumulator {
    pub total_sessions: u64,
    pub success_sessions: u64,
    pub ngrams: FxHashMap<Ngram, NgramStats>,
}

impl BucketAccumulator {
    /// Count one session toward the bucket totals.
    pub fn record_session(&mut self, successful: bool) {
        self.total_sessions += 1;
        if successful {
            self.success_sessions += 1;
        }
    }

    /// Count one session's n-gram set. The set is already deduplicated
    /// per session, so each entry bumps support by exactly 1.
    pub fn record_ngrams(&mut self, ngrams: FxHashSet<Ngram>, successful: bool) {
        for ngram in ngrams {
            let stats = self.ngrams.entry(ngram).or_default();
            stats.support += 1;
            if successful {
                stats.success += 1;
            }
        }
    }

    /// Fold another accumulator into this one.
    ///
    /// Pure counter addition: commutative and associative, so partial
    /// accumulators built from disjoint session subsets merge to the
    /// same result in any order. This is what makes the parallel map
    /// phase correct.
    pub fn merge(&mut self, other: BucketAccumulator) {
        self.total_sessions += other.total_sessions;
        self.success_sessions += other.success_sessions;
        for (ngram, stats) in other.ngrams {
            let entry = self.ngrams.entry(ngram).or_default();
            entry.support += stats.support;
            entry.success += stats.success;
        }
    }
}
