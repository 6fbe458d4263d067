use crate::error::{RailError, RailResult};
use crate::resolver::{Resolver, DEFAULT_THRESHOLD, QUANTITY_STEM_THRESHOLD};
use crate::utils::fuzzy::ScorerKind;
use crate::vocabulary::VocabularyStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Operator-supplied atomic command applied on top of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOverride {
    pub phrase: String,
    pub label: i32,
}

impl std::str::FromStr for CommandOverride {
    type Err = RailError;

    /// Parse `phrase=label`
    fn from_str(s: &str) -> RailResult<Self> {
        let (phrase, label) = s
            .rsplit_once('=')
            .ok_or_else(|| RailError::Config(format!("expected 'phrase=label', got '{}'", s)))?;
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(RailError::Config(format!("empty phrase in '{}'", s)));
        }
        let label = label
            .trim()
            .parse::<i32>()
            .map_err(|e| RailError::Config(format!("bad label in '{}': {}", s, e)))?;
        Ok(Self {
            phrase: phrase.to_string(),
            label,
        })
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Matching
    pub threshold: u8,
    pub quantity_threshold: u8,
    pub scorer: ScorerKind,

    // Vocabulary
    pub vocabulary_path: Option<PathBuf>,
    pub custom_commands: Vec<CommandOverride>,

    // Meta
    pub audit_edits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            quantity_threshold: QUANTITY_STEM_THRESHOLD,
            scorer: ScorerKind::default(),
            vocabulary_path: None,
            custom_commands: Vec::new(),
            audit_edits: false,
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`. A missing file yields defaults; a corrupt one
    /// is moved aside and defaults are used. Out-of-range thresholds are
    /// rejected.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Thresholds are percentages; anything above 100 can never match
    pub fn validate(&self) -> RailResult<()> {
        for (name, value) in [
            ("threshold", self.threshold),
            ("quantity_threshold", self.quantity_threshold),
        ] {
            if value > 100 {
                return Err(RailError::Config(format!(
                    "{} must be within 0..=100, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Add a custom command, or relabel it if the phrase is already listed
    pub fn upsert_custom_command(&mut self, phrase: &str, label: i32) {
        match self.custom_commands.iter_mut().find(|c| c.phrase == phrase) {
            Some(existing) => existing.label = label,
            None => self.custom_commands.push(CommandOverride {
                phrase: phrase.to_string(),
                label,
            }),
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the vocabulary: the configured file (or the built-in set), then
    /// the custom commands in order
    pub fn build_store(&self) -> RailResult<VocabularyStore> {
        let store = match &self.vocabulary_path {
            Some(path) => VocabularyStore::load(path)?,
            None => VocabularyStore::default(),
        };

        for cmd in &self.custom_commands {
            store.upsert_atomic_command(&cmd.phrase, cmd.label);
        }

        Ok(store)
    }

    pub fn build_resolver(&self) -> Resolver {
        Resolver::new(self.scorer.build(), self.quantity_threshold)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("railtalk")
        .join("config.json")
}
