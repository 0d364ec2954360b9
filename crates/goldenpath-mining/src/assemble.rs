//! Final output assembly: one record per bucket, deterministically ordered.

use crate::bucket::BucketKey;
use crate::types::{BucketResult, GoldenPathItem, ItemPaths};

/// A bucket after ranking, ready to be emitted.
pub struct RankedBucket {
    pub key: BucketKey,
    pub total_sessions: u64,
    pub success_sessions: u64,
    pub top: Vec<GoldenPathItem>,
    pub top_by_item: Option<Vec<ItemPaths>>,
}

/// Emit output records, newest period first. Period type and store id
/// break ties so reruns over identical input serialize identically.
pub fn assemble(mut buckets: Vec<RankedBucket>) -> Vec<BucketResult> {
    buckets.sort_by(|a, b| {
        b.key
            .period_start
            .cmp(&a.key.period_start)
            .then_with(|| a.key.period_type.cmp(&b.key.period_type))
            .then_with(|| a.key.store_id.cmp(&b.key.store_id))
    });

    buckets
        .into_iter()
        .map(|bucket| {
            debug_assert!(
                bucket.total_sessions > 0,
                "buckets are created lazily, an empty one cannot exist"
            );
            BucketResult {
                period_type: bucket.key.period_type,
                period_start: bucket.key.period_start,
                store_id: bucket.key.store_id,
                total_sessions: bucket.total_sessions,
                success_sessions: bucket.success_sessions,
                top: bucket.top,
                top_by_item: bucket.top_by_item,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PeriodType;

    fn ranked(period_start: &str, store_id: Option<&str>) -> RankedBucket {
        RankedBucket {
            key: BucketKey {
                period_type: PeriodType::Weekly,
                period_start: period_start.to_string(),
                store_id: store_id.map(|s| s.to_string()),
            },
            total_sessions: 1,
            success_sessions: 1,
            top: Vec::new(),
            top_by_item: None,
        }
    }

    #[test]
    fn test_newest_period_first() {
        let results = assemble(vec![
            ranked("2025-09-01", None),
            ranked("2025-10-01", None),
        ]);
        assert_eq!(results[0].period_start, "2025-10-01");
        assert_eq!(results[1].period_start, "2025-09-01");
    }

    #[test]
    fn test_store_id_breaks_ties() {
        let results = assemble(vec![
            ranked("2025-10-01", Some("store-2")),
            ranked("2025-10-01", None),
            ranked("2025-10-01", Some("store-1")),
        ]);
        let stores: Vec<Option<String>> =
            results.into_iter().map(|r| r.store_id).collect();
        assert_eq!(
            stores,
            vec![
                None,
                Some("store-1".to_string()),
                Some("store-2".to_string())
            ]
        );
    }
}
