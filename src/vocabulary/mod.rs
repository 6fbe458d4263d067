//! Vocabulary Store
//!
//! Holds the three lookup tables the resolver matches against:
//! - atomic commands: whole phrases, editable at runtime
//! - quantity commands: single-word stems that take a wagon count
//! - numerals: number words with their value and canonical text
//!
//! Tables keep insertion order, which doubles as the fuzzy tie-break order.

mod defaults;

use crate::error::{RailError, RailResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

/// A phrase mapped to its command label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub phrase: String,
    pub label: i32,
}

/// Ordered phrase -> label table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from pairs; a repeated phrase overwrites the earlier label
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut table = Self::new();
        for (phrase, label) in pairs {
            table.upsert(phrase, label);
        }
        table
    }

    /// Insert or overwrite. An overwritten phrase keeps its position.
    /// Returns the previous label, if any.
    pub fn upsert(&mut self, phrase: &str, label: i32) -> Option<i32> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.phrase == phrase) {
            return Some(std::mem::replace(&mut entry.label, label));
        }
        self.entries.push(CommandEntry {
            phrase: phrase.to_string(),
            label,
        });
        None
    }

    pub fn get(&self, phrase: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.phrase == phrase)
            .map(|e| e.label)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self, table: &str) -> RailResult<()> {
        if let Some(pos) = self.entries.iter().position(|e| e.phrase.trim().is_empty()) {
            return Err(RailError::Vocabulary(format!(
                "{} entry #{} has an empty phrase",
                table, pos
            )));
        }
        Ok(())
    }
}

/// A number word with its value and the text used in canonical phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumeralEntry {
    pub word: String,
    pub value: i64,
    pub text: String,
}

impl NumeralEntry {
    pub fn new(word: &str, value: i64, text: &str) -> Self {
        Self {
            word: word.to_string(),
            value,
            text: text.to_string(),
        }
    }
}

/// Ordered numeral table keyed by word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumeralTable {
    entries: Vec<NumeralEntry>,
}

impl NumeralTable {
    pub fn get(&self, word: &str) -> Option<&NumeralEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NumeralEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self) -> RailResult<()> {
        for entry in &self.entries {
            if entry.word.trim().is_empty() || entry.text.trim().is_empty() {
                return Err(RailError::Vocabulary(format!(
                    "numeral with value {} has an empty word or text",
                    entry.value
                )));
            }
            if entry.value <= 0 {
                return Err(RailError::Vocabulary(format!(
                    "numeral '{}' must be positive, got {}",
                    entry.word, entry.value
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<NumeralEntry> for NumeralTable {
    fn from_iter<I: IntoIterator<Item = NumeralEntry>>(iter: I) -> Self {
        let mut entries: Vec<NumeralEntry> = Vec::new();
        for entry in iter {
            match entries.iter_mut().find(|e| e.word == entry.word) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
        Self { entries }
    }
}

/// Serializable copy of the whole vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySnapshot {
    pub atomic_commands: CommandTable,
    pub quantity_commands: CommandTable,
    pub numerals: NumeralTable,
}

/// Shared vocabulary for the command resolver.
///
/// Only the atomic command table is mutable after construction, so it is the
/// only one behind a lock.
#[derive(Debug)]
pub struct VocabularyStore {
    atomic: RwLock<CommandTable>,
    quantity: CommandTable,
    numerals: NumeralTable,
}

impl Default for VocabularyStore {
    /// Built-in railway shunting vocabulary
    fn default() -> Self {
        Self::new(
            defaults::atomic_commands(),
            defaults::quantity_commands(),
            defaults::numerals(),
        )
    }
}

impl VocabularyStore {
    pub fn new(atomic: CommandTable, quantity: CommandTable, numerals: NumeralTable) -> Self {
        debug!(
            "Vocabulary: {} atomic, {} quantity, {} numerals",
            atomic.len(),
            quantity.len(),
            numerals.len()
        );
        Self {
            atomic: RwLock::new(atomic),
            quantity,
            numerals,
        }
    }

    /// Build a store from a snapshot, rejecting empty phrases and
    /// non-positive numerals
    pub fn from_snapshot(snapshot: VocabularySnapshot) -> RailResult<Self> {
        snapshot.atomic_commands.validate("atomic command")?;
        snapshot.quantity_commands.validate("quantity command")?;
        snapshot.numerals.validate()?;

        Ok(Self::new(
            snapshot.atomic_commands,
            snapshot.quantity_commands,
            snapshot.numerals,
        ))
    }

    /// Load a vocabulary file written by [`VocabularyStore::save`]
    pub fn load(path: &Path) -> RailResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: VocabularySnapshot = serde_json::from_str(&content)?;
        let store = Self::from_snapshot(snapshot)?;
        info!("📖 Loaded vocabulary from {:?}", path);
        Ok(store)
    }

    /// Write the current vocabulary, including runtime edits, as JSON
    pub fn save(&self, path: &Path) -> RailResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, content)?;
        info!("💾 Saved vocabulary to {:?}", path);
        Ok(())
    }

    /// Insert or overwrite an atomic command. Never fails.
    pub fn upsert_atomic_command(&self, phrase: &str, label: i32) {
        if phrase.trim().is_empty() {
            warn!("⚠️ Ignoring atomic command with empty phrase (label {})", label);
            return;
        }

        let mut table = self.atomic.write().unwrap_or_else(|poisoned| {
            warn!("⚠️ Atomic command lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });

        match table.upsert(phrase, label) {
            Some(previous) => info!("✏️ Command '{}' relabeled {} -> {}", phrase, previous, label),
            None => info!("➕ Command '{}' added with label {}", phrase, label),
        }
    }

    /// Read view of the atomic commands. Upserts wait until the guard drops.
    pub fn atomic_commands(&self) -> RwLockReadGuard<'_, CommandTable> {
        self.atomic.read().unwrap_or_else(|poisoned| {
            warn!("⚠️ Atomic command lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    pub fn quantity_commands(&self) -> &CommandTable {
        &self.quantity
    }

    pub fn numerals(&self) -> &NumeralTable {
        &self.numerals
    }

    pub fn snapshot(&self) -> VocabularySnapshot {
        VocabularySnapshot {
            atomic_commands: self.atomic_commands().clone(),
            quantity_commands: self.quantity.clone(),
            numerals: self.numerals.clone(),
        }
    }
}
