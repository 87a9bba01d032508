//! Intent file format and keyword-overlap matching.

use std::path::Path;

use faqmatch_core::error::{FaqError, Result};
use faqmatch_core::text::{tokenize, words};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Tag returned when no intent shares a token with the query.
pub const FALLBACK_TAG: &str = "fallback";

const UNKNOWN_RESPONSE: &str = "Sorry, I couldn't understand that.";

/// A tagged group of example phrasings and canned replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// All intents of one bot, in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentSet {
    pub intents: Vec<Intent>,
}

impl IntentSet {
    /// Parse an intents document from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| FaqError::Intents(format!("Parse intents: {e}")))
    }

    /// Load intents from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqError::Intents(format!("Read {}: {e}", path.display())))?;
        let set = Self::from_json(&content)?;
        tracing::info!("💬 Loaded {} intent(s) from {}", set.intents.len(), path.display());
        Ok(set)
    }

    /// Tag whose patterns share the most tokens with `query`.
    ///
    /// Each query token counts once per pattern that contains it. Only a
    /// strictly greater score replaces the current best, so the first intent
    /// wins ties; with no overlap at all the result is [`FALLBACK_TAG`].
    pub fn match_tag(&self, query: &str) -> &str {
        let query_tokens = tokenize(query);
        let mut best_tag: &str = FALLBACK_TAG;
        let mut best_score = 0usize;

        for intent in &self.intents {
            let score: usize = intent
                .patterns
                .iter()
                .map(|pattern| {
                    let pattern_tokens = words(pattern);
                    query_tokens.iter().filter(|t| pattern_tokens.contains(*t)).count()
                })
                .sum();
            if score > best_score {
                best_score = score;
                best_tag = intent.tag.as_str();
            }
        }

        tracing::debug!(tag = best_tag, score = best_score, "intent matched");
        best_tag
    }

    /// Random response from the first intent tagged `tag` that has any,
    /// or a generic apology.
    pub fn response_for<R: Rng + ?Sized>(&self, tag: &str, rng: &mut R) -> &str {
        self.intents
            .iter()
            .filter(|i| i.tag == tag)
            .find_map(|i| i.responses.choose(rng))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_RESPONSE)
    }

    /// Match `query` and pick a response.
    pub fn respond<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> &str {
        let tag = self.match_tag(query);
        self.response_for(tag, rng)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
