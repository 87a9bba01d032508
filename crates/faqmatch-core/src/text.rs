//! Text normalization — the canonical form every comparison runs on.
//!
//! ```text
//! "  How do I RESET my password?? "
//!   ↓ lower-case, punctuation → space, collapse whitespace, trim
//! "how do i reset my password"
//!   ↓ tokenize                      ↓ trigrams
//! {do, how, i, my, ...}           {how, ow_, w_d, _do, ...}
//! ```

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Stands in for spaces inside character trigrams.
pub const TRIGRAM_SEPARATOR: char = '_';

/// Anything that is neither a word character nor whitespace.
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Canonicalize `text`: lower-case, replace non-word characters with spaces,
/// collapse whitespace runs and trim. Idempotent and total.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = NON_WORD_RE.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RE.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}

/// Whitespace-split tokens of the normalized text, in order, duplicates kept.
pub fn words(text: &str) -> Vec<String> {
    normalize(text).split(' ').filter(|w| !w.is_empty()).map(str::to_string).collect()
}

/// Distinct tokens of the normalized text.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    words(text).into_iter().collect()
}

/// Overlapping 3-character windows of the normalized text with spaces
/// replaced by [`TRIGRAM_SEPARATOR`]. Texts shorter than three characters
/// yield a single-element set holding the whole (possibly empty) string.
pub fn trigrams(text: &str) -> HashSet<String> {
    let chars: Vec<char> = normalize(text)
        .chars()
        .map(|c| if c == ' ' { TRIGRAM_SEPARATOR } else { c })
        .collect();
    if chars.len() < 3 {
        return HashSet::from([chars.into_iter().collect::<String>()]);
    }
    chars.windows(3).map(|w| w.iter().collect()).collect()
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`; 0.0 when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
