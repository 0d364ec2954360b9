//! Per-purchased-item breakdown within a bucket.
//!
//! For the top-N items by purchasing sessions, mines golden paths over
//! only the sessions that purchased that item. The dashboards use this to
//! show how buyers of each best-seller actually navigated to it.

use goldenpath_core::types::collections::{FxHashMap, FxHashSet};
use goldenpath_core::MiningConfig;

use crate::bucket::BucketAccumulator;
use crate::ngram::extract_ngrams;
use crate::normalize::PathNormalizer;
use crate::ranking::rank_bucket;
use crate::types::{ItemPaths, RawSessionPath};

/// Mine golden paths per purchased item over one bucket's sessions.
///
/// Items are ranked by how many sessions purchased them; the top
/// `by_purchased_top` items each get their own mining pass over their
/// supporting sessions. With `one_path_per_item` only the single best
/// path is kept per item.
pub fn per_item_breakdown(
    sessions: &[&RawSessionPath],
    normalizer: &PathNormalizer,
    config: &MiningConfig,
) -> Vec<ItemPaths> {
    let top_items = top_purchased_items(sessions, config.by_purchased_top);
    if top_items.is_empty() {
        return Vec::new();
    }

    let item_config = if config.one_path_per_item {
        MiningConfig {
            top_k: 1,
            ..config.clone()
        }
    } else {
        config.clone()
    };

    top_items
        .into_iter()
        .map(|item| {
            let mut acc = BucketAccumulator::default();
            for session in sessions
                .iter()
                .filter(|s| s.purchased_items.iter().any(|i| *i == item))
            {
                let normalized = normalizer.normalize(session);
                acc.record_session(normalized.successful);
                acc.record_ngrams(
                    extract_ngrams(&normalized.tokens, item_config.ngram_max),
                    normalized.successful,
                );
            }
            let top = rank_bucket(&acc, &item_config);
            ItemPaths {
                item,
                total_sessions: acc.total_sessions,
                top,
            }
        })
        .collect()
}

/// Items ranked by purchasing-session count (desc), name as tie-break.
/// An item repeated within one session still counts that session once.
fn top_purchased_items(sessions: &[&RawSessionPath], n: usize) -> Vec<String> {
    let mut counts: FxHashMap<&str, u64> = FxHashMap::default();
    for session in sessions {
        let distinct: FxHashSet<&str> = session
            .purchased_items
            .iter()
            .map(String::as_str)
            .collect();
        for item in distinct {
            *counts.entry(item).or_default() += 1;
        }
    }
    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked.into_iter().map(|(item, _)| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PeriodType;

    fn session(path: &[&str], items: &[&str]) -> RawSessionPath {
        RawSessionPath {
            period_type: PeriodType::Weekly,
            period_start: "2025-10-01".to_string(),
            store_id: None,
            path: path.iter().map(|s| s.to_string()).collect(),
            purchased_items: items.iter().map(|s| s.to_string()).collect(),
            is_successful: Some(true),
        }
    }

    #[test]
    fn test_top_items_by_session_count() {
        let sessions = vec![
            session(&["/a"], &["latte", "scone"]),
            session(&["/b"], &["latte"]),
            session(&["/c"], &["mocha"]),
        ];
        let refs: Vec<&RawSessionPath> = sessions.iter().collect();
        let items = top_purchased_items(&refs, 2);
        assert_eq!(items, vec!["latte", "mocha"]);
    }

    #[test]
    fn test_repeated_item_in_session_counts_once() {
        let sessions = vec![session(&["/a"], &["latte", "latte"]), session(&["/b"], &["mocha"])];
        let refs: Vec<&RawSessionPath> = sessions.iter().collect();
        // Equal counts, so the name tie-break decides.
        assert_eq!(top_purchased_items(&refs, 2), vec!["latte", "mocha"]);
    }

    #[test]
    fn test_breakdown_mines_only_supporting_sessions() {
        let sessions = vec![
            session(&["/menu", "/cart"], &["latte"]),
            session(&["/menu", "/cart"], &["latte"]),
            session(&["/event", "/home"], &["mocha"]),
        ];
        let refs: Vec<&RawSessionPath> = sessions.iter().collect();
        let config = MiningConfig {
            min_support: 1,
            by_purchased_top: 1,
            ..Default::default()
        };
        let normalizer = PathNormalizer::new(&config);

        let breakdown = per_item_breakdown(&refs, &normalizer, &config);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].item, "latte");
        assert_eq!(breakdown[0].total_sessions, 2);
        // Paths from the mocha session never appear.
        assert!(breakdown[0]
            .top
            .iter()
            .all(|item| !item.sequence.contains(&"/event".to_string())));
    }

    #[test]
    fn test_one_path_per_item_truncates_to_one() {
        let sessions = vec![
            session(&["/menu", "/cart"], &["latte"]),
            session(&["/menu", "/cart"], &["latte"]),
        ];
        let refs: Vec<&RawSessionPath> = sessions.iter().collect();
        let config = MiningConfig {
            min_support: 1,
            by_purchased_top: 3,
            one_path_per_item: true,
            ..Default::default()
        };
        let normalizer = PathNormalizer::new(&config);

        let breakdown = per_item_breakdown(&refs, &normalizer, &config);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].top.len(), 1);
    }

    #[test]
    fn test_disabled_when_no_items_purchased() {
        let sessions = vec![session(&["/a"], &[])];
        let refs: Vec<&RawSessionPath> = sessions.iter().collect();
        let config = MiningConfig {
            by_purchased_top: 3,
            ..Default::default()
        };
        let normalizer = PathNormalizer::new(&config);
        assert!(per_item_breakdown(&refs, &normalizer, &config).is_empty());
    }
}
