//! Session path normalization and success resolution.
//!
//! Raw warehouse tokens carry query strings and entity ids, so identical
//! journeys would otherwise never line up. Normalization also resolves
//! the session's success signal to a single boolean here, decoupling the
//! rest of the pipeline from the detection policy in use (explicit flag,
//! success-token match, virtual sentinel, or a blanket assumption).

use std::sync::LazyLock;

use goldenpath_core::types::collections::FxHashSet;
use goldenpath_core::MiningConfig;
use regex::Regex;

use crate::types::RawSessionPath;

static QUERY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?.*$").expect("valid regex"));

// Numeric / UUID-like path segments of 6+ chars collapse to `/:id`.
static ID_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9a-fA-F-]{6,}(\b|/)").expect("valid regex"));

/// Default token normalization: strip `?query` suffixes and rewrite
/// id-like path segments to `/:id`.
pub fn normalize_token(token: &str) -> String {
    let stripped = QUERY_SUFFIX.replace(token, "");
    ID_SEGMENT.replace_all(&stripped, "/:id${1}").into_owned()
}

/// A session path after normalization, with its success signal resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSession {
    /// The cleaned token sequence. Empty only when the raw path was empty
    /// and no sentinel is configured; such a session still counts toward
    /// `total_sessions` but contributes no n-grams.
    pub tokens: Vec<String>,
    pub successful: bool,
}

/// Cleans one raw session path according to the run configuration.
#[derive(Debug)]
pub struct PathNormalizer {
    dedupe_consecutive: bool,
    normalize_tokens: bool,
    sentinel: Option<String>,
    assume_all_successful: bool,
    success_set: FxHashSet<String>,
}

impl PathNormalizer {
    pub fn new(config: &MiningConfig) -> Self {
        // Success tokens go through the same normalization as path tokens
        // so membership checks compare like with like.
        let mut success_set: FxHashSet<String> = config
            .success_tokens
            .iter()
            .map(|t| {
                if config.normalize_tokens {
                    normalize_token(t)
                } else {
                    t.clone()
                }
            })
            .collect();
        if let Some(sentinel) = &config.virtual_sentinel {
            success_set.insert(sentinel.clone());
        }
        Self {
            dedupe_consecutive: config.dedupe_consecutive,
            normalize_tokens: config.normalize_tokens,
            sentinel: config.virtual_sentinel.clone(),
            assume_all_successful: config.assume_all_successful,
            success_set,
        }
    }

    /// Normalize one session and resolve its success signal.
    ///
    /// Resolution order: `assume_all_successful`, then the session's
    /// embedded flag, then success-token membership over the final
    /// (normalized, sentinel-appended) sequence.
    pub fn normalize(&self, session: &RawSessionPath) -> NormalizedSession {
        let mut tokens: Vec<String> = if self.normalize_tokens {
            session.path.iter().map(|t| normalize_token(t)).collect()
        } else {
            session.path.clone()
        };

        if self.dedupe_consecutive {
            tokens = dedupe_consecutive(tokens);
        }

        // Appended unconditionally: the sentinel convention is how the
        // caller marks every ingested session as successful. An empty
        // path becomes the singleton sentinel sequence.
        if let Some(sentinel) = &self.sentinel {
            tokens.push(sentinel.clone());
        }

        let successful = if self.assume_all_successful {
            true
        } else if let Some(flag) = session.is_successful {
            flag
        } else {
            tokens.iter().any(|t| self.success_set.contains(t))
        };

        NormalizedSession { tokens, successful }
    }
}

/// Collapse runs of identical adjacent tokens to a single occurrence.
fn dedupe_consecutive(tokens: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if out.last() != Some(&token) {
            out.push(token);
        }
    }
    out
}
