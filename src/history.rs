//! Conversation persistence.
//!
//! Conversations are saved as a JSON array of `{"type", "content",
//! "timestamp"}` records in conversation order. Timestamps are generated at
//! save time, not carried from the original turns.

use anyhow::{Context, Result, bail};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::fs::atomic_write;
use crate::transcript::{Role, Turn};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedTurn {
    #[serde(rename = "type")]
    kind: String,
    content: String,
    timestamp: String,
}

const KIND_HUMAN: &str = "human";
const KIND_AI: &str = "ai";

/// Timestamp-derived filename used when `/save` is given no argument.
pub fn default_filename() -> String {
    format!("chat_history_{}.json", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Writes the conversation to `filename` as pretty-printed JSON.
pub fn save_conversation(turns: &[Turn], filename: &str) -> Result<()> {
    let records: Vec<PersistedTurn> = turns
        .iter()
        .map(|turn| PersistedTurn {
            kind: match turn.role {
                Role::Human => KIND_HUMAN,
                Role::Assistant => KIND_AI,
            }
            .to_string(),
            content: turn.text.clone(),
            timestamp: Local::now().to_rfc3339(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)
        .context("Failed to serialize conversation")?;

    atomic_write(filename, &json)
        .with_context(|| format!("Failed to write conversation to: {filename}"))
}

/// Reads a saved conversation back into turns.
///
/// Records with an unrecognized `type` are silently skipped, so files written
/// by newer versions (or by hand) load as much as they can.
pub fn load_conversation(filename: &str) -> Result<Vec<Turn>> {
    if !Path::new(filename).exists() {
        bail!("File not found: {filename}");
    }

    let contents = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read file: {filename}"))?;

    let records: Vec<PersistedTurn> = serde_json::from_str(&contents)
        .with_context(|| format!("Malformed conversation file: {filename}"))?;

    Ok(records
        .into_iter()
        .filter_map(|record| match record.kind.as_str() {
            KIND_HUMAN => Some(Turn::human(record.content)),
            KIND_AI => Some(Turn::assistant(record.content)),
            _ => None,
        })
        .collect())
}
