//! # FaqMatch Core
//!
//! Shared building blocks for the FaqMatch crates:
//! - [`error`]: the single error type used across the workspace
//! - [`config`]: `~/.faqmatch/config.toml` loading with sane defaults
//! - [`types`]: knowledge entries, candidates and match decisions
//! - [`text`]: normalization, tokenization and character trigrams

pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use config::FaqConfig;
pub use error::{FaqError, Result};
pub use types::{Candidate, KnowledgeEntry, MatchDecision, Strategy};
