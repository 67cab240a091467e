//! Outcome records of finished games, appended to a JSON array on disk.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path} does not hold a list of game records: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player_name: String,
    pub move_count: usize,
    pub solved: bool,
}

/// Appends `record` to the list stored at `path`, creating the file if it is missing or empty.
pub fn append_record(path: &Path, record: GameRecord) -> Result<(), RecordError> {
    let display = path.display().to_string();
    let io_error = |source| RecordError::Io {
        path: display.clone(),
        source,
    };

    let mut records: Vec<GameRecord> = match fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => {
            serde_json::from_str(&content).map_err(|source| RecordError::Format {
                path: display.clone(),
                source,
            })?
        }
        Ok(_) => Vec::new(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(io_error(e)),
    };

    records.push(record);
    let json = serde_json::to_string_pretty(&records).map_err(|source| RecordError::Format {
        path: display.clone(),
        source,
    })?;
    fs::write(path, json).map_err(io_error)?;

    log::info!("Saved game record #{} to {display}", records.len());
    Ok(())
}
