//! Swappable engine snapshot for callers that reload the knowledge base.
//!
//! Queries grab an `Arc` snapshot and run lock-free against it; a reload
//! builds a whole new engine and swaps the pointer. In-flight queries keep
//! answering from the snapshot they started with.

use std::sync::{Arc, PoisonError, RwLock};

use faqmatch_core::types::MatchDecision;

use crate::engine::FaqEngine;

pub struct EngineHandle {
    current: RwLock<Arc<FaqEngine>>,
}

impl EngineHandle {
    pub fn new(engine: FaqEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// The engine currently serving queries.
    pub fn snapshot(&self) -> Arc<FaqEngine> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install `engine` and return the one it replaced.
    pub fn replace(&self, engine: FaqEngine) -> Arc<FaqEngine> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(
            "🔄 Swapping knowledge base: {} → {} entries",
            current.len(),
            engine.len()
        );
        std::mem::replace(&mut *current, Arc::new(engine))
    }

    /// Answer against the current snapshot.
    pub fn find_answer(&self, query: &str) -> MatchDecision {
        self.snapshot().find_answer(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqmatch_core::types::Strategy;

    #[test]
    fn test_replace_swaps_engine() {
        let handle = EngineHandle::new(FaqEngine::new(Vec::new()));
        assert_eq!(handle.find_answer("where is my order").strategy, Strategy::NoKnowledgeBase);

        let old = handle.replace(FaqEngine::from_pairs([("Where is my order?", "In transit.")]));
        assert!(old.is_empty());

        let decision = handle.find_answer("where is my order");
        assert_eq!(decision.strategy, Strategy::Substring);
        assert_eq!(decision.answer, "In transit.");
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let handle = EngineHandle::new(FaqEngine::from_pairs([("Where is my order?", "old")]));
        let snapshot = handle.snapshot();
        handle.replace(FaqEngine::from_pairs([("Where is my order?", "new")]));

        assert_eq!(snapshot.find_answer("where is my order").answer, "old");
        assert_eq!(handle.find_answer("where is my order").answer, "new");
    }

    #[test]
    fn test_concurrent_queries() {
        let handle = Arc::new(EngineHandle::new(FaqEngine::from_pairs([
            ("How do I reset my password?", "Settings > security"),
            ("Where is my order?", "Check tracking."),
        ])));

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| handle.find_answer("reset password").strategy)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for t in threads {
            let strategies = t.join().unwrap();
            assert!(strategies.iter().all(|s| *s == Strategy::EnhancedFuzzy));
        }
    }
}
