//! # FaqMatch Knowledge
//!
//! Small in-memory question-answering retrieval over a fixed list of
//! (question, answer) pairs. No vector DB, no embeddings, no persistence:
//! the index is rebuilt from the loaded entries every run.
//!
//! ## How it works
//! ```text
//! User: "reset password"
//!   ↓ normalize
//! substring of a stored question (or vice versa)? ── yes ──→ Substring
//!   ↓ no
//! Shortlist ≤ 8 ids (inverted index hits, else partial-ratio scan)
//!   ↓ per candidate
//! fuzzy = 0.45·partial + 0.35·token_set + 0.20·token_sort
//! combined = 0.25·trigram_jaccard + 0.75·fuzzy
//!   ↓ best (+0.04·fuzzy if ≤ 3 query tokens)
//! ≥ 0.58 → EnhancedFuzzy, else Fallback
//! ```

pub mod constants;
pub mod engine;
pub mod handle;
pub mod index;
pub mod loader;
pub mod shortlist;
pub mod similarity;

pub use engine::FaqEngine;
pub use handle::EngineHandle;
pub use index::InvertedIndex;
pub use loader::{FaqRecord, load_entries};
pub use similarity::SimilarityScores;
