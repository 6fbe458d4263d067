//! RailTalk - Shunting command interpreter
//!
//! Resolves ASR transcripts from the command line or from a line stream.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use railtalk::config::{config_path as default_config_path, CommandOverride, Config};
use railtalk::{audit, Resolution, Resolver, VocabularyStore};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Similarity threshold for atomic commands and numerals (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: Option<u8>,

    /// Extra atomic command, repeatable
    #[arg(long = "command", value_name = "PHRASE=LABEL")]
    commands: Vec<CommandOverride>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Resolve a single transcript
    Resolve {
        /// Transcript words
        #[arg(required = true)]
        transcript: Vec<String>,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve stdin line by line, one JSON result per line.
    /// Lines of the form `+phrase=label` add or relabel a command.
    Stream,

    /// Print the vocabulary as JSON
    Vocab,

    /// Add or relabel an atomic command and persist it.
    /// Goes to --save, else the configured vocabulary file, else the config's
    /// custom commands.
    Learn {
        phrase: String,
        label: i32,

        /// Write the resulting vocabulary to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

/// Everything a running session needs
struct Session {
    store: VocabularyStore,
    resolver: Resolver,
    threshold: u8,
    audit_edits: bool,
}

impl Session {
    fn resolve(&self, transcript: &str) -> Resolution {
        self.resolver.resolve(&self.store, transcript, self.threshold)
    }

    /// Record an edit that has taken effect
    fn audit(&self, phrase: &str, label: i32) {
        if self.audit_edits {
            if let Err(e) = audit::log_vocabulary_edit(&audit::default_dir(), phrase, label) {
                warn!("⚠️ Failed to write audit log: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging (stderr, stdout carries results)
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🚂 RailTalk v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = Config::load_from(&config_path)?;

    // Command-line overrides apply to this run only and are never saved
    let store = config.build_store().context("Failed to build vocabulary")?;
    for cmd in &args.commands {
        store.upsert_atomic_command(&cmd.phrase, cmd.label);
    }

    let session = Session {
        store,
        resolver: config.build_resolver(),
        threshold: args.threshold.unwrap_or(config.threshold),
        audit_edits: config.audit_edits,
    };
    debug!(
        "Scorer: {}, thresholds: {}/{}",
        session.resolver.scorer_name(),
        session.threshold,
        session.resolver.quantity_threshold()
    );

    match args.action {
        Action::Resolve { transcript, json } => {
            let res = session.resolve(&transcript.join(" "));
            if json {
                println!("{}", serde_json::to_string(&res)?);
            } else {
                println!(
                    "{} (label {}, attribute {})",
                    res.canonical_phrase, res.label, res.attribute
                );
            }
        }
        Action::Stream => run_stream(&session).await?,
        Action::Vocab => {
            println!("{}", serde_json::to_string_pretty(&session.store.snapshot())?);
        }
        Action::Learn { phrase, label, save } => {
            if phrase.trim().is_empty() {
                anyhow::bail!("Cannot learn an empty phrase");
            }

            // Persist before auditing; --command overrides stay out of it
            match save.or_else(|| config.vocabulary_path.clone()) {
                Some(path) => {
                    let persisted = config.build_store()?;
                    persisted.upsert_atomic_command(&phrase, label);
                    persisted.save(&path)?;
                }
                None => {
                    config.upsert_custom_command(&phrase, label);
                    config
                        .save_to(&config_path)
                        .context("Failed to save config")?;
                    info!("💾 Saved '{}' to {:?}", phrase, config_path);
                }
            }
            session.audit(&phrase, label);
        }
    }

    Ok(())
}

async fn run_stream(session: &Session) -> Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut buf = Vec::new();

    info!("✅ Reading transcripts from stdin");

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        // Invalid UTF-8 is replaced rather than ending the session
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        // Session-only edit, live until the stream ends
        if let Some(edit) = line.strip_prefix('+') {
            match edit.parse::<CommandOverride>() {
                Ok(cmd) => {
                    session.store.upsert_atomic_command(&cmd.phrase, cmd.label);
                    session.audit(&cmd.phrase, cmd.label);
                }
                Err(e) => warn!("⚠️ Ignoring vocabulary edit: {}", e),
            }
            continue;
        }

        let res = session.resolve(line);
        let mut out = serde_json::to_string(&res)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
