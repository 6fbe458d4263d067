//! Command Resolver
//!
//! Turns a raw ASR transcript into a `(canonical phrase, label, attribute)`
//! triple against a [`VocabularyStore`].
//!
//! **Matching order:**
//! 1. Whole transcript vs atomic command phrases (caller's threshold)
//! 2. Each lower-cased token vs quantity command stems (strict threshold)
//! 3. Numeral aggregation over all tokens, only after a stem matched
//!
//! The first branch that succeeds wins; otherwise the result is
//! "unrecognized". Resolution never fails.

pub mod numerals;

use crate::utils::fuzzy::{best_match, IndelRatio, Scorer};
use crate::vocabulary::VocabularyStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use numerals::{aggregate, plural_wagons, Quantity};

/// Default similarity cutoff for whole-phrase atomic commands
pub const DEFAULT_THRESHOLD: u8 = 90;

/// Cutoff for single-token quantity stems. Short tokens collide easily, so
/// this stays stricter than the phrase threshold.
pub const QUANTITY_STEM_THRESHOLD: u8 = 95;

pub const UNRECOGNIZED_PHRASE: &str = "unrecognized";
pub const NO_LABEL: i32 = -1;
pub const NO_ATTRIBUTE: i64 = -1;

/// Which matching branch produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Atomic,
    Quantity,
    Unrecognized,
}

/// Outcome of resolving one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub canonical_phrase: String,
    /// Command label, or `NO_LABEL`
    pub label: i32,
    /// Wagon count, or `NO_ATTRIBUTE` when not applicable or not heard
    pub attribute: i64,
    pub route: Route,
}

impl Resolution {
    pub fn unrecognized() -> Self {
        Self {
            canonical_phrase: UNRECOGNIZED_PHRASE.to_string(),
            label: NO_LABEL,
            attribute: NO_ATTRIBUTE,
            route: Route::Unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.route != Route::Unrecognized
    }

    /// Wagon count, when one was determined
    pub fn quantity(&self) -> Option<i64> {
        (self.route == Route::Quantity && self.attribute >= 0).then_some(self.attribute)
    }
}

/// Stateless transcript resolver
pub struct Resolver {
    scorer: Box<dyn Scorer>,
    quantity_threshold: u8,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Box::new(IndelRatio), QUANTITY_STEM_THRESHOLD)
    }
}

impl Resolver {
    pub fn new(scorer: Box<dyn Scorer>, quantity_threshold: u8) -> Self {
        Self {
            scorer,
            quantity_threshold,
        }
    }

    pub fn with_scorer(scorer: Box<dyn Scorer>) -> Self {
        Self::new(scorer, QUANTITY_STEM_THRESHOLD)
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn quantity_threshold(&self) -> u8 {
        self.quantity_threshold
    }

    /// Resolve a transcript. `threshold` (0..=100) applies to atomic phrases
    /// and numeral words.
    pub fn resolve(&self, store: &VocabularyStore, transcript: &str, threshold: u8) -> Resolution {
        debug!("Resolving transcript: '{}'", transcript);

        if let Some(resolution) = self.match_atomic(store, transcript, threshold) {
            return resolution;
        }

        if let Some(resolution) = self.match_quantity(store, transcript, threshold) {
            return resolution;
        }

        debug!("No command matched for: '{}'", transcript);
        Resolution::unrecognized()
    }

    fn match_atomic(
        &self,
        store: &VocabularyStore,
        transcript: &str,
        threshold: u8,
    ) -> Option<Resolution> {
        let atomic = store.atomic_commands();
        let best = best_match(self.scorer.as_ref(), transcript, atomic.phrases())?;

        if best.score < threshold {
            debug!(
                "Closest atomic command '{}' scored {} < {}",
                best.value, best.score, threshold
            );
            return None;
        }

        let label = atomic.get(best.value)?;
        info!("🎯 Atomic command: '{}' (score {})", best.value, best.score);

        Some(Resolution {
            canonical_phrase: best.value.to_string(),
            label,
            attribute: NO_ATTRIBUTE,
            route: Route::Atomic,
        })
    }

    fn match_quantity(
        &self,
        store: &VocabularyStore,
        transcript: &str,
        threshold: u8,
    ) -> Option<Resolution> {
        let lowered = transcript.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let stems = store.quantity_commands();

        // The first token clearing the stem threshold fixes the command
        let stem = tokens.iter().find_map(|token| {
            best_match(self.scorer.as_ref(), token, stems.phrases())
                .filter(|m| m.score >= self.quantity_threshold)
        })?;
        let label = stems.get(stem.value)?;

        match aggregate(&tokens, store.numerals(), self.scorer.as_ref(), threshold) {
            Some(quantity) => {
                info!(
                    "🎯 Quantity command: '{}' x {} (score {})",
                    stem.value, quantity.total, stem.score
                );
                Some(Resolution {
                    canonical_phrase: format!("{} на {}", stem.value, quantity.phrases.join(" ")),
                    label,
                    attribute: quantity.total,
                    route: Route::Quantity,
                })
            }
            None => {
                info!("🎯 Quantity command: '{}' without count", stem.value);
                Some(Resolution {
                    canonical_phrase: stem.value.to_string(),
                    label,
                    attribute: NO_ATTRIBUTE,
                    route: Route::Quantity,
                })
            }
        }
    }
}

/// Resolve with the default scorer and threshold
pub fn resolve(store: &VocabularyStore, transcript: &str) -> Resolution {
    Resolver::default().resolve(store, transcript, DEFAULT_THRESHOLD)
}
