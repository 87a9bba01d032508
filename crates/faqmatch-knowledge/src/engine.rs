//! Decision engine — turns a query into a [`MatchDecision`].

use std::collections::HashSet;

use faqmatch_core::text::{jaccard, normalize, tokenize, trigrams, words};
use faqmatch_core::types::{Candidate, KnowledgeEntry, MatchDecision};

use crate::constants::{
    MIN_ACCEPT_SCORE, SHORTLIST_K, SHORT_QUERY_BONUS, SHORT_QUERY_MAX_TOKENS, WEIGHT_CHAR,
};
use crate::index::InvertedIndex;
use crate::shortlist::shortlist;
use crate::similarity;

const DEFAULT_FALLBACK_ANSWER: &str = "Sorry, I don't know that yet.";
const DEFAULT_NO_KNOWLEDGE_ANSWER: &str = "No knowledge base loaded.";

/// A fixed knowledge base with its derived lookup structures.
///
/// Immutable once built, so a shared reference can serve concurrent queries.
/// To pick up new entries build a new engine (see [`crate::EngineHandle`]).
#[derive(Debug, Clone)]
pub struct FaqEngine {
    entries: Vec<KnowledgeEntry>,
    /// Normalized question per entry, same order as `entries`.
    normalized: Vec<String>,
    /// Character trigrams per entry, same order as `entries`.
    trigrams: Vec<HashSet<String>>,
    index: InvertedIndex,
    fallback_answer: String,
    no_knowledge_answer: String,
}

impl FaqEngine {
    /// Build an engine over `entries`. Ids are reassigned to load order.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        let entries: Vec<KnowledgeEntry> = entries
            .into_iter()
            .enumerate()
            .map(|(id, e)| KnowledgeEntry { id, ..e })
            .collect();
        let normalized: Vec<String> = entries.iter().map(|e| normalize(&e.question)).collect();
        let trigrams = normalized.iter().map(|q| trigrams(q)).collect();
        let index = InvertedIndex::build(&entries);

        tracing::info!(
            "📚 Knowledge base ready: {} entries, {} indexed tokens",
            entries.len(),
            index.token_count()
        );

        Self {
            entries,
            normalized,
            trigrams,
            index,
            fallback_answer: DEFAULT_FALLBACK_ANSWER.into(),
            no_knowledge_answer: DEFAULT_NO_KNOWLEDGE_ANSWER.into(),
        }
    }

    /// Build from (question, answer) pairs in order.
    pub fn from_pairs<Q, A>(pairs: impl IntoIterator<Item = (Q, A)>) -> Self
    where
        Q: Into<String>,
        A: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .enumerate()
                .map(|(id, (q, a))| KnowledgeEntry::new(id, q, a))
                .collect(),
        )
    }

    /// Override the "don't know" answer.
    pub fn with_fallback_answer(mut self, answer: impl Into<String>) -> Self {
        self.fallback_answer = answer.into();
        self
    }

    /// Override the answer given when there are no entries.
    pub fn with_no_knowledge_answer(mut self, answer: impl Into<String>) -> Self {
        self.no_knowledge_answer = answer.into();
        self
    }

    /// Answer `query`.
    pub fn find_answer(&self, query: &str) -> MatchDecision {
        if self.entries.is_empty() {
            return MatchDecision::no_knowledge_base(&self.no_knowledge_answer);
        }

        let normalized_query = normalize(query);
        if let Some(entry) = self.substring_match(&normalized_query) {
            tracing::debug!(entry_id = entry.id, "substring match");
            return MatchDecision::substring(entry);
        }

        let ranked = self.rank(&normalized_query);
        let Some(best) = ranked.first() else {
            return MatchDecision::fallback(&self.fallback_answer, 0.0);
        };

        let mut score = best.combined;
        if words(&normalized_query).len() <= SHORT_QUERY_MAX_TOKENS {
            score += SHORT_QUERY_BONUS * best.fuzzy;
        }

        if score >= MIN_ACCEPT_SCORE {
            tracing::debug!(entry_id = best.entry_id, score, "fuzzy match accepted");
            MatchDecision::enhanced_fuzzy(&self.entries[best.entry_id], score)
        } else {
            tracing::debug!(entry_id = best.entry_id, score, "best candidate below threshold");
            MatchDecision::fallback(&self.fallback_answer, score)
        }
    }

    /// Ranked candidates the fuzzy stage would consider for `query`, best
    /// first, before the short-query bonus. Empty when there are no entries
    /// or the substring short-circuit applies.
    pub fn candidates(&self, query: &str) -> Vec<Candidate> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        let normalized_query = normalize(query);
        if self.substring_match(&normalized_query).is_some() {
            return Vec::new();
        }
        self.rank(&normalized_query)
    }

    /// First entry (storage order) whose normalized question contains the
    /// query or is contained in it.
    fn substring_match(&self, normalized_query: &str) -> Option<&KnowledgeEntry> {
        self.normalized
            .iter()
            .position(|q| q.contains(normalized_query) || normalized_query.contains(q.as_str()))
            .map(|id| &self.entries[id])
    }

    fn rank(&self, normalized_query: &str) -> Vec<Candidate> {
        let ids = shortlist(
            &self.index,
            &self.normalized,
            normalized_query,
            &tokenize(normalized_query),
            SHORTLIST_K,
        );
        let query_trigrams = trigrams(normalized_query);

        let mut candidates: Vec<Candidate> = ids
            .into_iter()
            .map(|id| {
                let fuzzy = similarity::score(normalized_query, &self.normalized[id]).fuzzy();
                let char_score = jaccard(&query_trigrams, &self.trigrams[id]);
                Candidate {
                    entry_id: id,
                    combined: WEIGHT_CHAR * char_score + (1.0 - WEIGHT_CHAR) * fuzzy,
                    fuzzy,
                    char_score,
                }
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.combined
                .total_cmp(&a.combined)
                .then(a.entry_id.cmp(&b.entry_id))
        });
        candidates
    }

    pub fn get(&self, entry_id: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(entry_id)
    }

    pub fn question(&self, entry_id: usize) -> Option<&str> {
        self.get(entry_id).map(|e| e.question.as_str())
    }

    pub fn answer(&self, entry_id: usize) -> Option<&str> {
        self.get(entry_id).map(|e| e.answer.as_str())
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqmatch_core::types::Strategy;

    fn support_faq() -> FaqEngine {
        FaqEngine::from_pairs([
            ("How do I reset my password?", "Go to settings > security"),
            ("Where is my order?", "Check the tracking link in your confirmation email."),
            ("What payment methods do you accept?", "Visa, Mastercard and PayPal."),
            ("How do I cancel my subscription?", "Open billing and press cancel."),
            ("Do you ship internationally?", "Yes, to over 40 countries."),
        ])
    }

    #[test]
    fn test_empty_knowledge_base() {
        let engine = FaqEngine::new(Vec::new());
        for query in ["hello", "", "reset password"] {
            let decision = engine.find_answer(query);
            assert_eq!(decision.strategy, Strategy::NoKnowledgeBase);
            assert_eq!(decision.answer, "No knowledge base loaded.");
            assert!(decision.entry_id.is_none());
        }
        assert!(engine.candidates("hello").is_empty());
    }

    #[test]
    fn test_exact_question_is_substring_match() {
        let engine = support_faq();
        for entry in engine.entries() {
            let decision = engine.find_answer(&entry.question);
            assert_eq!(decision.strategy, Strategy::Substring);
            assert_eq!(decision.entry_id, Some(entry.id));
            assert_eq!(decision.answer, entry.answer);
        }
    }

    #[test]
    fn test_substring_both_directions() {
        let engine = support_faq();
        let contained = engine.find_answer("ship internationally");
        assert_eq!(contained.strategy, Strategy::Substring);
        assert_eq!(contained.entry_id, Some(4));

        let containing = engine.find_answer("Hi! Where is my order? It's late");
        assert_eq!(containing.strategy, Strategy::Substring);
        assert_eq!(containing.entry_id, Some(1));
    }

    #[test]
    fn test_substring_takes_first_in_storage_order() {
        let engine = FaqEngine::from_pairs([
            ("how do i track my order", "first"),
            ("my order", "second"),
        ]);
        // "my order" is literally stored as entry 1 but entry 0 contains it too.
        let decision = engine.find_answer("My order!");
        assert_eq!(decision.strategy, Strategy::Substring);
        assert_eq!(decision.entry_id, Some(0));
        assert_eq!(decision.answer, "first");
    }

    #[test]
    fn test_reset_password_is_enhanced_fuzzy() {
        let engine =
            FaqEngine::from_pairs([("how do I reset my password", "Go to settings > security")]);
        let decision = engine.find_answer("reset password");
        assert_eq!(decision.strategy, Strategy::EnhancedFuzzy);
        assert_eq!(decision.entry_id, Some(0));
        assert_eq!(decision.answer, "Go to settings > security");
        assert!(decision.score.unwrap() >= MIN_ACCEPT_SCORE);
    }

    #[test]
    fn test_fuzzy_picks_best_candidate() {
        let engine = support_faq();
        let decision = engine.find_answer("cancel subscription");
        assert_eq!(decision.strategy, Strategy::EnhancedFuzzy);
        assert_eq!(decision.entry_id, Some(3));
    }

    #[test]
    fn test_gibberish_falls_back() {
        let engine = support_faq();
        let decision = engine.find_answer("zzxqplm");
        assert_eq!(decision.strategy, Strategy::Fallback);
        assert_eq!(decision.answer, "Sorry, I don't know that yet.");
        assert!(decision.entry_id.is_none());
        assert!(decision.score.unwrap() < MIN_ACCEPT_SCORE);
    }

    #[test]
    fn test_custom_answers() {
        let engine = support_faq().with_fallback_answer("Ask a human.");
        assert_eq!(engine.find_answer("zzxqplm").answer, "Ask a human.");

        let empty = FaqEngine::new(Vec::new()).with_no_knowledge_answer("Nothing loaded.");
        assert_eq!(empty.find_answer("hi").answer, "Nothing loaded.");
    }

    #[test]
    fn test_deterministic() {
        let engine = support_faq();
        for query in ["reset password", "zzxqplm", "payment visa", "order where", "ship abroad?"] {
            let first = engine.find_answer(query);
            for _ in 0..10 {
                assert_eq!(engine.find_answer(query), first);
            }
            assert_eq!(engine.candidates(query), engine.candidates(query));
        }
    }

    #[test]
    fn test_candidates_ranked_and_bounded() {
        let engine = support_faq();
        let candidates = engine.candidates("how do i pay");
        assert!(!candidates.is_empty());
        assert!(candidates.len() <= SHORTLIST_K);
        for pair in candidates.windows(2) {
            assert!(
                pair[0].combined > pair[1].combined
                    || (pair[0].combined == pair[1].combined && pair[0].entry_id < pair[1].entry_id)
            );
        }
        for c in &candidates {
            let expected = WEIGHT_CHAR * c.char_score + (1.0 - WEIGHT_CHAR) * c.fuzzy;
            assert!((c.combined - expected).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&c.fuzzy));
            assert!((0.0..=1.0).contains(&c.char_score));
        }
        // Substring hits never reach the fuzzy stage.
        assert!(engine.candidates("where is my order").is_empty());
    }

    #[test]
    fn test_candidates_do_not_change_decision() {
        let engine = support_faq();
        let before = engine.find_answer("cancel subscription");
        let _ = engine.candidates("cancel subscription");
        assert_eq!(engine.find_answer("cancel subscription"), before);
    }

    #[test]
    fn test_ids_reassigned_to_load_order() {
        let engine = FaqEngine::new(vec![
            KnowledgeEntry::new(7, "first question", "a"),
            KnowledgeEntry::new(7, "second question", "b"),
        ]);
        assert_eq!(engine.entries()[0].id, 0);
        assert_eq!(engine.entries()[1].id, 1);
        assert_eq!(engine.question(1), Some("second question"));
        assert_eq!(engine.answer(0), Some("a"));
        assert!(engine.get(2).is_none());
    }

    #[test]
    fn test_long_texts_stay_fast() {
        // ~340-char query against eight ~780-char questions.
        let engine = FaqEngine::from_pairs((0..8).map(|i| {
            let question = format!("how do i reset my password for account number {i} ").repeat(16);
            (question, format!("answer {i}"))
        }));
        let query = "please help me reset the password on my account ".repeat(7);

        let start = std::time::Instant::now();
        let decision = engine.find_answer(&query);
        let elapsed = start.elapsed();

        assert_ne!(decision.strategy, Strategy::Substring);
        assert!(elapsed < std::time::Duration::from_secs(2), "took {elapsed:?}");
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FaqEngine>();
    }
}
