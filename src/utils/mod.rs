//! Utility modules

pub mod fuzzy;

pub use fuzzy::{best_match, IndelRatio, JaroWinklerRatio, LevenshteinRatio, ScoredMatch, Scorer, ScorerKind};
