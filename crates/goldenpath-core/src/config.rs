//! Mining configuration and validation.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default success endpoint: the payment-completion page.
pub const DEFAULT_SUCCESS_TOKEN: &str = "/payment-complete";

/// Synthetic terminal token callers may append to mark a session successful
/// without per-token success detection.
pub const VIRTUAL_SUCCESS_TOKEN: &str = "__SUCCESS__";

/// Configuration for a golden-path mining run.
///
/// All options are caller-provided; [`MiningConfig::validate`] rejects
/// out-of-range values before any session is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Maximum contiguous sub-sequence length considered.
    pub ngram_max: usize,
    /// Minimum number of supporting sessions for an n-gram to be reportable.
    pub min_support: u64,
    /// Maximum ranked items returned per bucket.
    pub top_k: usize,
    /// Collapse consecutive repeated tokens before mining.
    pub dedupe_consecutive: bool,
    /// Apply default token normalization (strip query strings, rewrite
    /// id-like path segments to `/:id`) before mining.
    pub normalize_tokens: bool,
    /// Tokens whose presence marks a session as successful.
    pub success_tokens: Vec<String>,
    /// When set, this sentinel is appended as the final token of every
    /// session path and is implicitly treated as a success token.
    pub virtual_sentinel: Option<String>,
    /// Treat every session as successful (documents a caller guarantee).
    pub assume_all_successful: bool,
    /// Force `success_rate` to 1.0 for every reported item.
    pub success_rate_always_one: bool,
    /// Sessions per worker chunk in the map phase. `None` derives a chunk
    /// size from the input length and available parallelism.
    pub chunk_size: Option<usize>,
    /// When > 0, additionally mine golden paths for the top-N purchased
    /// items of each bucket. 0 disables the per-item breakdown.
    pub by_purchased_top: usize,
    /// Report only the single best path per purchased item.
    pub one_path_per_item: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            ngram_max: 5,
            min_support: 3,
            top_k: 10,
            dedupe_consecutive: true,
            normalize_tokens: true,
            success_tokens: vec![DEFAULT_SUCCESS_TOKEN.to_string()],
            virtual_sentinel: None,
            assume_all_successful: false,
            success_rate_always_one: false,
            chunk_size: None,
            by_purchased_top: 0,
            one_path_per_item: false,
        }
    }
}

impl MiningConfig {
    /// Validate option ranges. Called once up front by the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ngram_max < 1 {
            return Err(ConfigError::NgramMax(self.ngram_max));
        }
        if self.min_support < 1 {
            return Err(ConfigError::MinSupport(self.min_support));
        }
        if self.top_k < 1 {
            return Err(ConfigError::TopK(self.top_k));
        }
        if self.chunk_size == Some(0) {
            return Err(ConfigError::ChunkSize);
        }
        Ok(())
    }

    /// Convenience: enable the virtual-sentinel convention with the
    /// default sentinel token.
    pub fn with_virtual_sentinel(mut self) -> Self {
        self.virtual_sentinel = Some(VIRTUAL_SUCCESS_TOKEN.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MiningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ngram_max_rejected() {
        let config = MiningConfig {
            ngram_max: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NgramMax(0)));
    }

    #[test]
    fn test_zero_min_support_rejected() {
        let config = MiningConfig {
            min_support: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MinSupport(0)));
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let config = MiningConfig {
            top_k: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TopK(0)));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = MiningConfig {
            chunk_size: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ChunkSize));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: MiningConfig =
            serde_json::from_str(r#"{"ngram_max": 3, "top_k": 5}"#).unwrap();
        assert_eq!(config.ngram_max, 3);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.min_support, 3);
        assert!(config.dedupe_consecutive);
    }

    #[test]
    fn test_with_virtual_sentinel() {
        let config = MiningConfig::default().with_virtual_sentinel();
        assert_eq!(
            config.virtual_sentinel.as_deref(),
            Some(VIRTUAL_SUCCESS_TOKEN)
        );
    }
}
