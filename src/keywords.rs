//! Keyword frequency ranking over visible page text
//!
//! Tokens are whatever whitespace splitting yields, lowercased. Short
//! tokens and stopwords are dropped, the rest are counted and ranked.
//! Ties keep first-occurrence order, so the ranking is deterministic for
//! a given text.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tokens shorter than this many characters are ignored by default
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Number of keywords a ranking returns by default
pub const DEFAULT_TOP_N: usize = 15;

const DEFAULT_STOPWORDS: [&str; 6] = ["and", "the", "for", "that", "this", "with"];

/// Lowercase words excluded from ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Stopwords(HashSet<String>);

impl Default for Stopwords {
    fn default() -> Self {
        Stopwords(DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect())
    }
}

impl Stopwords {
    /// An empty stopword list
    pub fn none() -> Self {
        Stopwords(HashSet::new())
    }

    /// Adds a word, stored lowercase to match lowercased tokens
    pub fn insert(&mut self, word: impl Into<String>) {
        self.0.insert(word.into().to_lowercase());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A ranked keyword with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub word: String,
    pub count: usize,
}

/// Knobs for the ranking pass
#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    /// Minimum token length in characters
    pub min_length: usize,
    /// Maximum number of entries returned
    pub top_n: usize,
    pub stopwords: Stopwords,
}

impl Default for RankOptions {
    fn default() -> Self {
        RankOptions {
            min_length: DEFAULT_MIN_LENGTH,
            top_n: DEFAULT_TOP_N,
            stopwords: Stopwords::default(),
        }
    }
}

/// Counts and ranks keywords in `text`.
///
/// Sorting is by count descending; equal counts keep the order the words
/// first appeared in the text.
pub fn rank(text: &str, options: &RankOptions) -> Vec<KeywordEntry> {
    let lowered = text.to_lowercase();
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in lowered.split_whitespace() {
        if token.chars().count() < options.min_length || options.stopwords.contains(token) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut entries: Vec<KeywordEntry> = counts
        .into_iter()
        .map(|(word, count)| KeywordEntry {
            word: word.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(options.top_n);
    entries
}

/// Sum of counts across a ranked list, the denominator for share-of-total
/// figures
pub fn total_count(entries: &[KeywordEntry]) -> usize {
    entries.iter().map(|e| e.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_counts_case_insensitively() {
        let entries = rank("Rust rust RUST runs", &RankOptions::default());
        assert_eq!(entries[0].word, "rust");
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[1].word, "runs");
        assert_eq!(entries[1].count, 1);
    }

    #[test]
    fn test_rank_drops_stopwords_and_short_tokens() {
        let entries = rank("the cat and the dog ran with that toy", &RankOptions::default());
        // "cat", "dog", "ran", "toy" are under four characters; the rest
        // are stopwords
        assert!(entries.is_empty());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let entries = rank("äöüß tea", &RankOptions::default());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "äöüß");
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let entries = rank("zebra apple zebra apple mango", &RankOptions::default());
        let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_top_n_truncates_after_sorting() {
        let options = RankOptions {
            top_n: 2,
            ..RankOptions::default()
        };
        let entries = rank("mango mango apple apple apple zebra", &options);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word, "apple");
        assert_eq!(entries[1].word, "mango");
    }

    #[test]
    fn test_custom_stopwords() {
        let mut stopwords = Stopwords::none();
        stopwords.insert("Mango");
        let options = RankOptions {
            stopwords,
            ..RankOptions::default()
        };
        let entries = rank("mango apple", &options);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "apple");
    }

    #[test]
    fn test_total_count() {
        let entries = rank("apple apple zebra", &RankOptions::default());
        assert_eq!(total_count(&entries), 3);
        assert_eq!(total_count(&[]), 0);
    }
}
