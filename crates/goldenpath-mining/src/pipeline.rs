//! Map/reduce orchestration of a mining run.
//!
//! The input session list is partitioned into disjoint chunks; each chunk
//! is mapped in parallel into accumulators only that worker owns, then a
//! single-threaded reduce folds the chunk maps together. No shared
//! mutable state exists during the map phase, so no locks are needed;
//! merge commutativity/associativity (see `bucket.rs`) guarantees the
//! fold order cannot change the result.

use std::time::Instant;

use goldenpath_core::traits::{CancellationToken, NeverCancel};
use goldenpath_core::types::collections::FxHashMap;
use goldenpath_core::{MiningConfig, MiningError};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::assemble::{self, RankedBucket};
use crate::bucket::{BucketAccumulator, BucketKey};
use crate::ngram::extract_ngrams;
use crate::normalize::PathNormalizer;
use crate::ranking::rank_bucket;
use crate::segment;
use crate::types::{GoldenPathItem, MiningOutcome, MiningStats, MiningStatus, RawSessionPath};

/// Floor for derived chunk sizes; below this the per-chunk overhead
/// outweighs the parallelism.
const MIN_CHUNK_SIZE: usize = 64;

type LocalAccumulators = FxHashMap<BucketKey, BucketAccumulator>;

/// A chunk is either fully mapped or never started — there is no
/// partially-counted chunk under cancellation.
enum ChunkOutcome {
    Done(LocalAccumulators),
    Skipped,
}

/// One-shot mining over a session batch with the given configuration.
pub fn mine(
    sessions: &[RawSessionPath],
    config: MiningConfig,
) -> Result<MiningOutcome, MiningError> {
    Ok(MiningPipeline::new(config)?.run(sessions, &NeverCancel))
}

/// The golden-path mining pipeline.
///
/// Construction validates the configuration; a constructed pipeline
/// cannot fail at run time.
#[derive(Debug)]
pub struct MiningPipeline {
    config: MiningConfig,
    normalizer: PathNormalizer,
}

impl MiningPipeline {
    pub fn new(config: MiningConfig) -> Result<Self, MiningError> {
        config.validate()?;
        let normalizer = PathNormalizer::new(&config);
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Run the full map → reduce → rank → assemble pipeline.
    ///
    /// Cancellation is polled before each chunk; chunks already mapped
    /// are merged and the outcome is marked `Partial`.
    pub fn run(
        &self,
        sessions: &[RawSessionPath],
        cancel: &dyn CancellationToken,
    ) -> MiningOutcome {
        let start = Instant::now();
        let chunk_size = self.effective_chunk_size(sessions.len());
        let chunks: Vec<&[RawSessionPath]> = sessions.chunks(chunk_size).collect();
        debug!(
            sessions = sessions.len(),
            chunks = chunks.len(),
            chunk_size,
            "map phase start"
        );

        // Map: chunk-local accumulators, no shared mutable state.
        let outcomes: Vec<ChunkOutcome> = chunks
            .par_iter()
            .map(|chunk| {
                if cancel.is_cancelled() {
                    return ChunkOutcome::Skipped;
                }
                ChunkOutcome::Done(self.map_chunk(chunk))
            })
            .collect();

        // Reduce: single-threaded fold of the chunk maps.
        let collect_sessions = self.config.by_purchased_top > 0;
        let mut merged: LocalAccumulators = FxHashMap::default();
        let mut included_sessions: Vec<&RawSessionPath> = Vec::new();
        let mut chunks_skipped = 0usize;
        let mut sessions_processed = 0usize;
        for (chunk, outcome) in chunks.iter().zip(outcomes) {
            match outcome {
                ChunkOutcome::Done(local) => {
                    sessions_processed += chunk.len();
                    if collect_sessions {
                        included_sessions.extend(chunk.iter());
                    }
                    for (key, acc) in local {
                        merged.entry(key).or_default().merge(acc);
                    }
                }
                ChunkOutcome::Skipped => chunks_skipped += 1,
            }
        }

        // Rank: buckets are independent, so this phase parallelizes too.
        // Keys are sorted first so the parallel collect sees a stable
        // input order regardless of hash-map iteration.
        let mut keyed: Vec<(BucketKey, BucketAccumulator)> = merged.into_iter().collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let ranked: Vec<(BucketKey, BucketAccumulator, Vec<GoldenPathItem>)> = keyed
            .into_par_iter()
            .map(|(key, acc)| {
                let top = rank_bucket(&acc, &self.config);
                (key, acc, top)
            })
            .collect();

        // Optional per-item breakdown over each bucket's own sessions.
        let mut sessions_by_bucket: FxHashMap<BucketKey, Vec<&RawSessionPath>> =
            FxHashMap::default();
        if collect_sessions {
            for session in included_sessions {
                sessions_by_bucket
                    .entry(BucketKey::of(session))
                    .or_default()
                    .push(session);
            }
        }

        let ranked_buckets: Vec<RankedBucket> = ranked
            .into_iter()
            .map(|(key, acc, top)| {
                let top_by_item = if collect_sessions {
                    sessions_by_bucket.get(&key).map(|bucket_sessions| {
                        segment::per_item_breakdown(
                            bucket_sessions,
                            &self.normalizer,
                            &self.config,
                        )
                    })
                } else {
                    None
                };
                RankedBucket {
                    key,
                    total_sessions: acc.total_sessions,
                    success_sessions: acc.success_sessions,
                    top,
                    top_by_item,
                }
            })
            .collect();

        let buckets = assemble::assemble(ranked_buckets);

        let status = if chunks_skipped == 0 {
            MiningStatus::Complete
        } else {
            warn!(chunks_skipped, "mining cancelled, returning partial result");
            MiningStatus::Partial { chunks_skipped }
        };
        let stats = MiningStats {
            sessions_total: sessions.len(),
            sessions_processed,
            buckets: buckets.len(),
            chunks: chunks.len(),
            duration: start.elapsed(),
        };
        info!(
            buckets = stats.buckets,
            sessions = stats.sessions_processed,
            duration_ms = stats.duration.as_millis() as u64,
            partial = status.is_partial(),
            "mining run finished"
        );

        MiningOutcome {
            buckets,
            stats,
            status,
        }
    }

    /// Normalize, extract, and record every session of one chunk into
    /// accumulators owned by this call alone.
    fn map_chunk(&self, chunk: &[RawSessionPath]) -> LocalAccumulators {
        let mut local = LocalAccumulators::default();
        for session in chunk {
            let normalized = self.normalizer.normalize(session);
            let acc = local.entry(BucketKey::of(session)).or_default();
            acc.record_session(normalized.successful);
            // An empty normalized path is a zero-signal session: counted
            // above, but it contributes no n-grams.
            let grams = extract_ngrams(&normalized.tokens, self.config.ngram_max);
            acc.record_ngrams(grams, normalized.successful);
        }
        local
    }

    fn effective_chunk_size(&self, total: usize) -> usize {
        if let Some(size) = self.config.chunk_size {
            return size;
        }
        let workers = rayon::current_num_threads().max(1);
        (total / workers).max(MIN_CHUNK_SIZE)
    }
}
