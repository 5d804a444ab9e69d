//! Schedule input and report output.
//!
//! - Schedules: JSONL, one pairing or one full match record per line
//! - Reports: pretty-printed JSON
//! - Per-player exports: JSONL

pub mod jsonl;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::{MatchRecord, Matchup};

pub use jsonl::{JsonlIterator, JsonlReader, JsonlWriter};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid JSON on line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid matchup #{index}: {reason}")]
    InvalidMatchup { index: usize, reason: String },
}

/// Line layout of a schedule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleFormat {
    /// `{"team_a": ["A", "B"], "team_b": ["C", "D"]}`
    #[default]
    Pairings,
    /// Full [`MatchRecord`] objects
    Records,
}

/// Read a chronological schedule and flatten it into match records.
pub fn read_schedule(path: &Path, format: ScheduleFormat) -> Result<Vec<MatchRecord>, StorageError> {
    let records: Vec<MatchRecord> = match format {
        ScheduleFormat::Pairings => {
            let matchups: Vec<Matchup> = JsonlReader::new(path).read_all()?;
            if let Some(index) = matchups.iter().position(|m| !m.has_distinct_players()) {
                return Err(StorageError::InvalidMatchup {
                    index,
                    reason: format!("player listed twice in {}", matchups[index].id()),
                });
            }
            matchups.iter().map(MatchRecord::from).collect()
        }
        ScheduleFormat::Records => JsonlReader::new(path).read_all()?,
    };

    info!("Loaded {} matchups from {:?}", records.len(), path);
    Ok(records)
}

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    info!("Wrote {:?}", path);
    Ok(())
}
