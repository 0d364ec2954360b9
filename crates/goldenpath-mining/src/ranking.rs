//! Deterministic top-K selection over a finalized bucket.

use goldenpath_core::MiningConfig;

use crate::bucket::BucketAccumulator;
use crate::types::GoldenPathItem;

/// Filter, score, sort, and truncate one bucket's n-gram table.
///
/// Sort order: support descending, then sequence length descending
/// (longer sequences explain more of the journey at equal frequency),
/// then lexicographic token comparison. The final tie-break makes the
/// order total, so identical inputs always rank identically.
pub fn rank_bucket(acc: &BucketAccumulator, config: &MiningConfig) -> Vec<GoldenPathItem> {
    if acc.total_sessions == 0 {
        return Vec::new();
    }

    let force_success_rate = config.success_rate_always_one || config.assume_all_successful;

    let mut survivors: Vec<_> = acc
        .ngrams
        .iter()
        .filter(|(_, stats)| stats.support >= config.min_support)
        .collect();

    survivors.sort_by(|(gram_a, stats_a), (gram_b, stats_b)| {
        stats_b
            .support
            .cmp(&stats_a.support)
            .then_with(|| gram_b.len().cmp(&gram_a.len()))
            .then_with(|| gram_a.tokens().cmp(gram_b.tokens()))
    });
    survivors.truncate(config.top_k);

    survivors
        .into_iter()
        .map(|(gram, stats)| GoldenPathItem {
            sequence: gram.to_vec(),
            support: stats.support,
            // min_support >= 1 guarantees support > 0 here.
            success_rate: if force_success_rate {
                1.0
            } else {
                stats.success as f64 / stats.support as f64
            },
            coverage: stats.support as f64 / acc.total_sessions as f64,
        })
        .collect()
}
