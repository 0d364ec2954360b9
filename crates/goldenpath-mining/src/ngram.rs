//! Contiguous sub-sequence (n-gram) extraction.

use goldenpath_core::types::collections::FxHashSet;
use smallvec::SmallVec;

/// An ordered tuple of 1..=ngram_max tokens.
///
/// Equality and hashing are structural; the derived total order backs the
/// deterministic ranking tie-breaks. Most mined sequences are short, so
/// tokens live inline up to 4 entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ngram(SmallVec<[String; 4]>);

impl Ngram {
    pub fn from_slice(tokens: &[String]) -> Self {
        Self(tokens.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.to_vec()
    }
}

/// Extract every contiguous sub-sequence of length 1..=min(ngram_max, L).
///
/// The result is a set: an n-gram recurring inside a single path is
/// reported once, because support counts sessions, not occurrences.
pub fn extract_ngrams(tokens: &[String], ngram_max: usize) -> FxHashSet<Ngram> {
    let len = tokens.len();
    let max_n = ngram_max.min(len);
    let mut out = FxHashSet::default();
    for n in 1..=max_n {
        for start in 0..=(len - n) {
            out.insert(Ngram::from_slice(&tokens[start..start + n]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn gram(parts: &[&str]) -> Ngram {
        Ngram::from_slice(&toks(parts))
    }

    #[test]
    fn test_from_slice_clones_owned_tokens() {
        let tokens = toks(&["/home", "/menu", "/cart"]);
        let gram = Ngram::from_slice(&tokens);
        assert_eq!(gram.tokens(), tokens.as_slice());
        assert_eq!(gram.to_vec(), tokens);
        // The source slice is untouched and still usable.
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_extracts_all_windows() {
        let grams = extract_ngrams(&toks(&["/a", "/b", "/c"]), 2);
        let expected = vec![
            gram(&["/a"]),
            gram(&["/b"]),
            gram(&["/c"]),
            gram(&["/a", "/b"]),
            gram(&["/b", "/c"]),
        ];
        assert_eq!(grams.len(), expected.len());
        for gram in expected {
            assert!(grams.contains(&gram));
        }
    }

    #[test]
    fn test_dedupes_within_path() {
        // "/a" occurs twice but is reported once.
        let grams = extract_ngrams(&toks(&["/a", "/b", "/a"]), 1);
        assert_eq!(grams.len(), 2);
        assert!(grams.contains(&gram(&["/a"])));
        assert!(grams.contains(&gram(&["/b"])));
    }

    #[test]
    fn test_ngram_max_clamped_to_path_length() {
        let grams = extract_ngrams(&toks(&["/a", "/b"]), 10);
        // 2 unigrams + 1 bigram, nothing longer than the path.
        assert_eq!(grams.len(), 3);
        assert!(grams.iter().all(|g| g.len() <= 2));
    }

    #[test]
    fn test_empty_path_yields_nothing() {
        assert!(extract_ngrams(&[], 5).is_empty());
    }

    #[test]
    fn test_prefix_is_distinct_from_longer_gram() {
        let a = gram(&["/a"]);
        let ab = gram(&["/a", "/b"]);
        assert_ne!(a, ab);
    }

    #[test]
    fn test_ngram_ordering_is_lexicographic() {
        let a = gram(&["/a"]);
        let ab = gram(&["/a", "/b"]);
        let b = gram(&["/b"]);
        assert!(a < ab);
        assert!(ab < b);
    }
}
