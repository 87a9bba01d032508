//! Fixed weights and thresholds of the matcher.
//!
//! These are part of the matching contract; changing any of them changes
//! which answers are accepted.

/// Maximum number of candidates scored by the fuzzy ensemble.
pub const SHORTLIST_K: usize = 8;

pub const WEIGHT_PARTIAL: f64 = 0.45;
pub const WEIGHT_TOKEN_SET: f64 = 0.35;
pub const WEIGHT_TOKEN_SORT: f64 = 0.20;

/// Share of the trigram score in the combined score; fuzzy gets the rest.
pub const WEIGHT_CHAR: f64 = 0.25;

/// Queries with at most this many tokens get the short-query bonus.
pub const SHORT_QUERY_MAX_TOKENS: usize = 3;
pub const SHORT_QUERY_BONUS: f64 = 0.04;

/// Minimum combined score for an `EnhancedFuzzy` answer.
pub const MIN_ACCEPT_SCORE: f64 = 0.58;
