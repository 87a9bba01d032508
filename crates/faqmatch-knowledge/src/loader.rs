//! JSONL knowledge-base loader.
//!
//! One JSON object per line with string `question` and `answer` fields.
//! Extra fields are ignored. Blank lines are skipped silently, malformed
//! lines are skipped with a warning, and a missing file is an empty
//! knowledge base rather than an error.

use std::path::Path;

use faqmatch_core::error::{FaqError, Result};
use faqmatch_core::types::KnowledgeEntry;
use serde::{Deserialize, Serialize};

/// A raw record as it appears in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
}

/// Load records from a JSONL file.
pub fn load_jsonl(path: &Path) -> Result<Vec<FaqRecord>> {
    if !path.exists() {
        tracing::warn!("⚠️ Knowledge base {} not found, starting empty", path.display());
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| FaqError::KnowledgeBase(format!("Read {}: {e}", path.display())))?;
    let records = parse_jsonl(&content);
    tracing::info!("📖 Loaded {} FAQ record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Parse JSONL text, keeping well-formed records in file order.
pub fn parse_jsonl(content: &str) -> Vec<FaqRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<FaqRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping malformed record on line {}: {e}", lineno + 1);
            }
        }
    }
    if skipped > 0 {
        tracing::warn!("⚠️ Skipped {skipped} malformed record(s)");
    }
    records
}

/// Assign dense ids in record order.
pub fn entries_from_records(records: Vec<FaqRecord>) -> Vec<KnowledgeEntry> {
    records
        .into_iter()
        .enumerate()
        .map(|(id, r)| KnowledgeEntry::new(id, r.question, r.answer))
        .collect()
}

/// Load a JSONL file straight into knowledge entries.
pub fn load_entries(path: &Path) -> Result<Vec<KnowledgeEntry>> {
    Ok(entries_from_records(load_jsonl(path)?))
}
