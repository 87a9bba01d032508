//! FaqMatch configuration system.
//!
//! Only the I/O-facing knobs live here. Scoring weights and the acceptance
//! threshold are fixed constants of the matcher and are not configurable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaqError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqConfig {
    /// JSONL knowledge base, one `{"question", "answer"}` object per line.
    #[serde(default = "default_knowledge_path")]
    pub knowledge_path: String,
    /// Intents file for the keyword bot.
    #[serde(default = "default_intents_path")]
    pub intents_path: String,
    /// Answer given when no candidate clears the threshold.
    #[serde(default = "default_fallback_answer")]
    pub fallback_answer: String,
    /// Answer given when the knowledge base is empty.
    #[serde(default = "default_no_knowledge_answer")]
    pub no_knowledge_answer: String,
    /// How many ranked candidates `--debug` prints.
    #[serde(default = "default_debug_candidates")]
    pub debug_candidates: usize,
    /// Inputs that end an interactive session (compared lower-cased).
    #[serde(default = "default_exit_commands")]
    pub exit_commands: Vec<String>,
}

fn default_knowledge_path() -> String { "faq.jsonl".into() }
fn default_intents_path() -> String { "faq.json".into() }
fn default_fallback_answer() -> String { "Sorry, I don't know that yet.".into() }
fn default_no_knowledge_answer() -> String { "No knowledge base loaded.".into() }
fn default_debug_candidates() -> usize { 6 }
fn default_exit_commands() -> Vec<String> { vec!["quit".into(), "exit".into()] }

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            knowledge_path: default_knowledge_path(),
            intents_path: default_intents_path(),
            fallback_answer: default_fallback_answer(),
            no_knowledge_answer: default_no_knowledge_answer(),
            debug_candidates: default_debug_candidates(),
            exit_commands: default_exit_commands(),
        }
    }
}

impl FaqConfig {
    /// Load config from the default path (~/.faqmatch/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqError::Config(format!("Failed to read config: {e}")))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("⚙️ Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text. Missing fields take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| FaqError::Config(format!("Failed to parse config: {e}")))
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| FaqError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the FaqMatch home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".faqmatch")
    }

    /// Knowledge base path with `~` expanded.
    pub fn knowledge_file(&self) -> PathBuf {
        expand_path(&self.knowledge_path)
    }

    /// Intents path with `~` expanded.
    pub fn intents_file(&self) -> PathBuf {
        expand_path(&self.intents_path)
    }

    /// Whether `input` is one of the configured exit commands.
    pub fn is_exit_command(&self, input: &str) -> bool {
        let input = input.trim().to_lowercase();
        self.exit_commands.iter().any(|c| c.to_lowercase() == input)
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}
