//! Fuzzy matching utilities
//!
//! Scores ASR tokens and phrases against vocabulary keys on a 0..=100
//! integer scale, the way thresholds are expressed in configuration.

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

/// Similarity metric used for vocabulary lookups
pub trait Scorer: Send + Sync {
    /// Similarity of `a` and `b` in the range 0..=100
    fn ratio(&self, a: &str, b: &str) -> u8;

    /// Name of this scorer for logging
    fn name(&self) -> &str;
}

/// InDel similarity turned into a percentage (default).
///
/// Only insertions and deletions count, so a substitution costs two edits
/// and a dropped letter costs one. Scores `2 * lcs / (len_a + len_b)`; an
/// empty side scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelRatio;

impl Scorer for IndelRatio {
    fn ratio(&self, a: &str, b: &str) -> u8 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let common = longest_common_subsequence(&a, &b);
        to_percent((2 * common) as f64 / (a.len() + b.len()) as f64)
    }

    fn name(&self) -> &str {
        "indel"
    }
}

/// Length of the longest common subsequence, single-row DP
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];

    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Normalized Levenshtein distance turned into a percentage
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl Scorer for LevenshteinRatio {
    fn ratio(&self, a: &str, b: &str) -> u8 {
        to_percent(normalized_levenshtein(a, b))
    }

    fn name(&self) -> &str {
        "levenshtein"
    }
}

/// Jaro-Winkler similarity turned into a percentage.
///
/// Rewards shared prefixes, so it is more forgiving of clipped word endings
/// than Levenshtein.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerRatio;

impl Scorer for JaroWinklerRatio {
    fn ratio(&self, a: &str, b: &str) -> u8 {
        to_percent(jaro_winkler(a, b))
    }

    fn name(&self) -> &str {
        "jaro_winkler"
    }
}

/// Scorer selection as it appears in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Indel,
    Levenshtein,
    JaroWinkler,
}

impl ScorerKind {
    pub fn build(self) -> Box<dyn Scorer> {
        match self {
            ScorerKind::Indel => Box::new(IndelRatio),
            ScorerKind::Levenshtein => Box::new(LevenshteinRatio),
            ScorerKind::JaroWinkler => Box::new(JaroWinklerRatio),
        }
    }
}

/// Halves round to even: 12.5 -> 12, 13.5 -> 14
fn to_percent(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round_ties_even() as u8
}

/// Best pool entry for a candidate, with its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMatch<'a> {
    pub value: &'a str,
    pub score: u8,
}

/// Find the highest-scoring entry of `pool` for `candidate`.
///
/// Ties go to the entry seen first. Returns None for an empty pool.
pub fn best_match<'a, I>(scorer: &dyn Scorer, candidate: &str, pool: I) -> Option<ScoredMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<ScoredMatch<'a>> = None;

    for value in pool {
        let score = scorer.ratio(candidate, value);
        if best.map_or(true, |current| score > current.score) {
            best = Some(ScoredMatch { value, score });
        }
        if score == 100 {
            // Nothing later can beat an exact hit under first-seen ties
            break;
        }
    }

    best
}
