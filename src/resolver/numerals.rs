//! Numeral aggregation
//!
//! Sums every number word (or bare digit token) in a transcript into a single
//! wagon count. Units are added, never multiplied.

use crate::utils::fuzzy::{best_match, Scorer};
use crate::vocabulary::NumeralTable;
use tracing::debug;

/// Wagon count extracted from a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub total: i64,
    /// Canonical text of each counted token, in transcript order
    pub phrases: Vec<String>,
}

/// Scan `tokens` for numerals.
///
/// A token counts if it fuzzy-matches a numeral word at `threshold` or
/// better; otherwise an all-digit token is parsed as-is. Anything else is
/// skipped. Returns None when nothing was counted.
pub fn aggregate(
    tokens: &[&str],
    numerals: &NumeralTable,
    scorer: &dyn Scorer,
    threshold: u8,
) -> Option<Quantity> {
    let mut total: i64 = 0;
    let mut phrases = Vec::new();

    for token in tokens {
        let matched = best_match(scorer, token, numerals.words())
            .filter(|m| m.score >= threshold)
            .and_then(|m| numerals.get(m.value));

        if let Some(entry) = matched {
            debug!("🔢 '{}' -> {} ({})", token, entry.word, entry.value);
            total = total.saturating_add(entry.value);
            phrases.push(entry.text.clone());
        } else if is_digits(token) {
            match token.parse::<i64>() {
                Ok(count) => {
                    debug!("🔢 '{}' -> {}", token, count);
                    total = total.saturating_add(count);
                    phrases.push(format!("{} {}", count, plural_wagons(count)));
                }
                Err(e) => debug!("Skipping digit token '{}': {}", token, e),
            }
        }
    }

    if phrases.is_empty() {
        None
    } else {
        Some(Quantity { total, phrases })
    }
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Russian noun form of "wagon" agreeing with `count`
pub fn plural_wagons(count: i64) -> &'static str {
    let n = count.unsigned_abs();
    match (n % 10, n % 100) {
        (1, r) if r != 11 => "вагон",
        (2..=4, r) if !(12..=14).contains(&r) => "вагона",
        _ => "вагонов",
    }
}
