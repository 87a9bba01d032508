//! Fuzzy similarity ensemble.
//!
//! All ratios are built on the Indel ratio `2·LCS / (|a| + |b|)` over
//! characters: 1.0 for equal strings, 0.0 when no character lines up,
//! decreasing as insertions and deletions pile up.
//!
//! LCS lengths are computed bit-parallel (Hyyrö), 64 pattern characters
//! per machine word, so one alignment costs `|text| · ⌈|pattern| / 64⌉`.

use std::collections::HashMap;

use faqmatch_core::text::{tokenize, words};

use crate::constants::{WEIGHT_PARTIAL, WEIGHT_TOKEN_SET, WEIGHT_TOKEN_SORT};

/// The three fuzzy sub-scores of a (query, question) pair, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScores {
    pub partial: f64,
    pub token_set: f64,
    pub token_sort: f64,
}

impl SimilarityScores {
    /// Weighted fuzzy sub-score.
    pub fn fuzzy(&self) -> f64 {
        WEIGHT_PARTIAL * self.partial
            + WEIGHT_TOKEN_SET * self.token_set
            + WEIGHT_TOKEN_SORT * self.token_sort
    }
}

/// Score `query` against `question` with all three fuzzy measures.
pub fn score(query: &str, question: &str) -> SimilarityScores {
    SimilarityScores {
        partial: partial_ratio(query, question),
        token_set: token_set_ratio(query, question),
        token_sort: token_sort_ratio(query, question),
    }
}

/// Plain alignment ratio of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    indel_ratio(&a, &b)
}

/// Best ratio between the shorter string and any window of the longer
/// string of the same length.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 1.0 } else { 0.0 };
    }

    let pattern = PatternMasks::new(&short);
    let text = pattern.lookup(&long);
    let width = short.len();
    let last = long.len() - width;

    let mut best = 0usize;
    for start in 0..=last {
        // Sliding past a leading character absent from `short` never lowers
        // the LCS, so only windows opening on a shared character (and the
        // final window) can hold the maximum.
        if text[start].is_none() && start != last {
            continue;
        }
        best = best.max(pattern.lcs(&text[start..start + width]));
        if best == width {
            break;
        }
    }
    2.0 * best as f64 / (2 * width) as f64
}

/// Order- and duplicate-insensitive ratio.
///
/// Compares the shared tokens against the shared tokens plus each side's
/// remainder, and the two extended strings against each other; keeps the best.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sect = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = join_nonempty(&sect, &only_a);
    let combined_b = join_nonempty(&sect, &only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &combined_a)).max(ratio(&sect, &combined_b));
    }
    best
}

/// Order-insensitive ratio: tokens sorted and rejoined before comparing.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_words(a), &sorted_words(b))
}

fn sorted_words(text: &str) -> String {
    let mut w = words(text);
    w.sort();
    w.join(" ")
}

fn join<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_len(a, b) as f64 / total as f64
}

/// Longest common subsequence length.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if pattern.is_empty() {
        return 0;
    }
    let masks = PatternMasks::new(pattern);
    masks.lcs(&masks.lookup(text))
}

/// Match bit-vectors of a pattern: bit `i` of a character's mask is set
/// when `pattern[i]` is that character.
struct PatternMasks {
    len: usize,
    blocks: usize,
    masks: HashMap<char, Vec<u64>>,
}

impl PatternMasks {
    fn new(pattern: &[char]) -> Self {
        let blocks = pattern.len().div_ceil(64);
        let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            masks.entry(c).or_insert_with(|| vec![0; blocks])[i / 64] |= 1u64 << (i % 64);
        }
        Self { len: pattern.len(), blocks, masks }
    }

    /// Mask of every character of `text`; `None` where it is not in the pattern.
    fn lookup(&self, text: &[char]) -> Vec<Option<&[u64]>> {
        text.iter().map(|c| self.masks.get(c).map(Vec::as_slice)).collect()
    }

    /// LCS of the pattern against a text given as looked-up masks.
    fn lcs(&self, text: &[Option<&[u64]>]) -> usize {
        let mut v = vec![u64::MAX; self.blocks];
        for mask in text.iter().flatten() {
            let mut carry = 0u64;
            for (word, &m) in v.iter_mut().zip(mask.iter()) {
                let u = *word & m;
                let (sum, c1) = word.overflowing_add(u);
                let (sum, c2) = sum.overflowing_add(carry);
                carry = u64::from(c1 || c2);
                *word = sum | (*word & !m);
            }
        }

        // Each zero bit inside the pattern length is one matched character.
        v.iter()
            .enumerate()
            .map(|(i, &word)| {
                let bits = (self.len - i * 64).min(64);
                let valid = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
                (!word & valid).count_ones() as usize
            })
            .sum()
    }
}
