//! Error types shared by every FaqMatch crate.

/// Errors raised while loading configuration, knowledge bases or intents.
///
/// Matching itself never fails; "no answer" outcomes are expressed as
/// [`crate::Strategy`] values instead.
#[derive(Debug, thiserror::Error)]
pub enum FaqError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("intents error: {0}")]
    Intents(String),
}

pub type Result<T> = std::result::Result<T, FaqError>;
