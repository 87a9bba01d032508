//! Candidate shortlisting: cheap pre-selection before the fuzzy ensemble.

use std::collections::{BTreeSet, HashMap};

use crate::index::InvertedIndex;
use crate::similarity::partial_ratio;

/// Up to `k` entry ids for `query_tokens`, most relevant first.
///
/// Entries are ranked by how many query tokens their question shares,
/// ties broken by ascending id. When no token hits the index, every
/// question is ranked by partial ratio against `normalized_query`
/// instead, ties kept in storage order.
pub fn shortlist(
    index: &InvertedIndex,
    normalized_questions: &[String],
    normalized_query: &str,
    query_tokens: &BTreeSet<String>,
    k: usize,
) -> Vec<usize> {
    let hits = by_token_hits(index, query_tokens, k);
    if !hits.is_empty() {
        return hits;
    }
    tracing::debug!("No index hits for {:?}, scanning all questions", normalized_query);
    by_partial_ratio(normalized_questions, normalized_query, k)
}

/// Rank entries by number of shared tokens. Empty if nothing matched.
pub fn by_token_hits(
    index: &InvertedIndex,
    query_tokens: &BTreeSet<String>,
    k: usize,
) -> Vec<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in query_tokens {
        for &id in index.lookup(token) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(usize, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(k).map(|(id, _)| id).collect()
}

/// Rank every question by partial ratio against the query.
pub fn by_partial_ratio(
    normalized_questions: &[String],
    normalized_query: &str,
    k: usize,
) -> Vec<usize> {
    let mut scored: Vec<(usize, f64)> = normalized_questions
        .iter()
        .enumerate()
        .map(|(id, q)| (id, partial_ratio(normalized_query, q)))
        .collect();
    // Stable sort keeps storage order among equal scores.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(k).map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqmatch_core::text::{normalize, tokenize};
    use faqmatch_core::types::KnowledgeEntry;

    fn fixture() -> (InvertedIndex, Vec<String>) {
        let entries: Vec<KnowledgeEntry> = [
            "where is my order",
            "how do i reset my password",
            "can i change my order",
            "what payment methods do you accept",
            "how do i cancel my order",
        ]
        .iter()
        .enumerate()
        .map(|(i, q)| KnowledgeEntry::new(i, *q, "answer"))
        .collect();
        let questions = entries.iter().map(|e| normalize(&e.question)).collect();
        (InvertedIndex::build(&entries), questions)
    }

    #[test]
    fn test_hits_ordered_by_count_then_id() {
        let (index, _) = fixture();
        // "order" hits 0, 2, 4; "cancel" only 4; "my" hits 0, 1, 2, 4.
        let ids = by_token_hits(&index, &tokenize("cancel my order"), 8);
        assert_eq!(ids, vec![4, 0, 2, 1]);
    }

    #[test]
    fn test_hits_truncated_to_k() {
        let (index, _) = fixture();
        let ids = by_token_hits(&index, &tokenize("my order"), 2);
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_hits_deterministic() {
        let (index, _) = fixture();
        let tokens = tokenize("how do i my");
        let first = by_token_hits(&index, &tokens, 8);
        for _ in 0..20 {
            assert_eq!(by_token_hits(&index, &tokens, 8), first);
        }
    }

    #[test]
    fn test_fallback_when_no_hits() {
        let (index, questions) = fixture();
        let query = normalize("passwrd");
        let ids = shortlist(&index, &questions, &query, &tokenize(&query), 3);
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], 1);
    }

    #[test]
    fn test_fallback_ties_keep_storage_order() {
        let questions: Vec<String> = vec!["aaa".into(), "bbb".into(), "ccc".into()];
        let ids = by_partial_ratio(&questions, "zzz", 8);
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
