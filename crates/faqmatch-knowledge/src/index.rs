//! Inverted index from normalized question tokens to entry ids.

use std::collections::{BTreeSet, HashMap};

use faqmatch_core::text::tokenize;
use faqmatch_core::types::KnowledgeEntry;

static EMPTY_POSTINGS: BTreeSet<usize> = BTreeSet::new();

/// Token → posting set. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<usize>>,
}

impl InvertedIndex {
    /// Index every distinct token of every entry's question.
    pub fn build(entries: &[KnowledgeEntry]) -> Self {
        let mut postings: HashMap<String, BTreeSet<usize>> = HashMap::new();
        for entry in entries {
            for token in tokenize(&entry.question) {
                postings.entry(token).or_default().insert(entry.id);
            }
        }
        tracing::debug!(
            "🗂️ Indexed {} entries under {} distinct tokens",
            entries.len(),
            postings.len()
        );
        Self { postings }
    }

    /// Entry ids whose question contains `token`; empty for unseen tokens.
    pub fn lookup(&self, token: &str) -> &BTreeSet<usize> {
        self.postings.get(token).unwrap_or(&EMPTY_POSTINGS)
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<KnowledgeEntry> {
        vec![
            KnowledgeEntry::new(0, "How do I reset my password?", "a"),
            KnowledgeEntry::new(1, "Where is my order", "b"),
            KnowledgeEntry::new(2, "Reset the router, reset the modem", "c"),
        ]
    }

    #[test]
    fn test_build_and_lookup() {
        let index = InvertedIndex::build(&entries());
        assert_eq!(index.lookup("reset"), &BTreeSet::from([0, 2]));
        assert_eq!(index.lookup("my"), &BTreeSet::from([0, 1]));
        assert_eq!(index.lookup("order"), &BTreeSet::from([1]));
        assert!(index.lookup("banana").is_empty());
        // Tokens are normalized, so raw forms never match.
        assert!(index.lookup("Reset").is_empty());
        assert!(index.lookup("password?").is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = InvertedIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.token_count(), 0);
        assert!(index.lookup("anything").is_empty());
    }
}
