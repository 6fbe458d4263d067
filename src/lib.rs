//! RailTalk Library
//!
//! Resolves noisy ASR transcripts of railway shunting commands into
//! command labels, canonical phrases and wagon counts.

pub mod audit;
pub mod config;
pub mod error;
pub mod resolver;
pub mod utils;
pub mod vocabulary;

pub use error::{RailError, RailResult};
pub use resolver::{resolve, Resolution, Resolver, Route, DEFAULT_THRESHOLD};
pub use vocabulary::VocabularyStore;
