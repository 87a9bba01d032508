//! Data model shared between the matcher and its callers.

use serde::{Deserialize, Serialize};

/// A single (question, answer) pair of the knowledge base.
///
/// `id` is the position in load order; ids are dense (`0..N-1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: usize,
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(id: usize, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// How a [`MatchDecision`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Query and stored question contain one another after normalization.
    Substring,
    /// Best fuzzy-ensemble candidate cleared the acceptance threshold.
    EnhancedFuzzy,
    /// Nothing cleared the threshold.
    Fallback,
    /// The engine holds no entries.
    NoKnowledgeBase,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::EnhancedFuzzy => write!(f, "enhanced_fuzzy"),
            Self::Fallback => write!(f, "fallback"),
            Self::NoKnowledgeBase => write!(f, "none"),
        }
    }
}

/// Result of answering one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDecision {
    pub strategy: Strategy,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<usize>,
    /// Final combined score, present for fuzzy and fallback decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MatchDecision {
    pub fn substring(entry: &KnowledgeEntry) -> Self {
        Self {
            strategy: Strategy::Substring,
            answer: entry.answer.clone(),
            entry_id: Some(entry.id),
            score: None,
        }
    }

    pub fn enhanced_fuzzy(entry: &KnowledgeEntry, score: f64) -> Self {
        Self {
            strategy: Strategy::EnhancedFuzzy,
            answer: entry.answer.clone(),
            entry_id: Some(entry.id),
            score: Some(score),
        }
    }

    pub fn fallback(answer: impl Into<String>, score: f64) -> Self {
        Self {
            strategy: Strategy::Fallback,
            answer: answer.into(),
            entry_id: None,
            score: Some(score),
        }
    }

    pub fn no_knowledge_base(answer: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::NoKnowledgeBase,
            answer: answer.into(),
            entry_id: None,
            score: None,
        }
    }

    /// Whether the decision carries an answer from the knowledge base.
    pub fn is_match(&self) -> bool {
        self.entry_id.is_some()
    }
}

/// One scored shortlist candidate. Lives only for the duration of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub entry_id: usize,
    /// `0.25 * char_score + 0.75 * fuzzy`, before any short-query bonus.
    pub combined: f64,
    /// Weighted partial / token-set / token-sort score.
    pub fuzzy: f64,
    /// Trigram Jaccard similarity.
    pub char_score: f64,
}
