//! Score persistence
//!
//! Features:
//! - Byte-oriented key-value [`Storage`] trait
//! - In-memory and JSON file backends
//! - Best-effort load/save: failures are logged and absorbed

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

use crate::consts::SCORES_KEY;
use crate::scores::ScoreRecord;

/// Errors raised by storage backends and the score codec
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("malformed store: {0}")]
    Malformed(String),
}

/// A named-key byte store
pub trait Storage {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;
    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), PersistenceError>;
}

/// Encode a score record as its JSON array blob
pub fn encode_scores(scores: &ScoreRecord) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(scores)?)
}

/// Decode a JSON array blob into a score record
pub fn decode_scores(bytes: &[u8]) -> Result<ScoreRecord, PersistenceError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Load the saved score record. `None` when absent or unreadable.
pub fn load_scores(storage: &dyn Storage) -> Option<ScoreRecord> {
    let bytes = match storage.get(SCORES_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::info!("No saved scores found, starting fresh");
            return None;
        }
        Err(e) => {
            log::warn!("Could not read saved scores: {}", e);
            return None;
        }
    };

    match decode_scores(&bytes) {
        Ok(scores) => {
            log::info!("Loaded scores: {} wins, {} losses", scores.wins, scores.losses);
            Some(scores)
        }
        Err(e) => {
            log::warn!("Discarding malformed saved scores: {}", e);
            None
        }
    }
}

/// Save the score record, keeping the previous value on failure.
/// Returns whether the write happened.
pub fn save_scores(storage: &mut dyn Storage, scores: &ScoreRecord) -> bool {
    let result = encode_scores(scores).and_then(|bytes| storage.set(SCORES_KEY, bytes));
    match result {
        Ok(()) => {
            log::info!("Scores saved ({} wins, {} losses)", scores.wins, scores.losses);
            true
        }
        Err(e) => {
            log::warn!("Scores not saved: {}", e);
            false
        }
    }
}
