//! JSON-lines event log.
//!
//! Each event is appended as one `LoggedEvent` line as soon as it happens.
//! Replay reads the whole file back in order.


use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::event::{Event, LoggedEvent};

#[derive(Debug, thiserror::Error)]
pub enum EventLogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Append-only writer for one participant's log file.
pub struct EventLogWriter {
    path: PathBuf,
    participant_id: Option<String>,
    /// Kept open in append mode to avoid repeated open/close per event.
    file: Option<File>,
    /// Events appended through this handle.
    entry_count: usize,
}

impl EventLogWriter {
    pub fn new(path: &Path, participant_id: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            participant_id,
            file: None,
            entry_count: 0,
        }
    }

    /// Stamp `event` with the current time and append it.
    pub fn append(&mut self, event: &Event) -> Result<LoggedEvent, EventLogError> {
        let logged = LoggedEvent::now(event.clone(), self.participant_id.clone());
        self.append_logged(&logged)?;
        Ok(logged)
    }

    /// Append an already-stamped entry.
    pub fn append_logged(&mut self, entry: &LoggedEvent) -> Result<(), EventLogError> {
        let mut line = serde_json::to_vec(entry).map_err(EventLogError::Serialize)?;
        line.push(b'\n');

        let file = self.open_file()?;
        file.write_all(&line)?;
        file.flush()?;

        self.entry_count += 1;
        Ok(())
    }

    /// Get or lazily open the log file handle.
    fn open_file(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(f) => f,
            None => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?;
                debug!(path = %self.path.display(), "opened event log");
                file
            }
        };
        Ok(self.file.insert(file))
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}

/// Read every entry of a log file. Blank lines are skipped.
pub fn read_event_log(path: &Path) -> Result<Vec<LoggedEvent>, EventLogError> {
    let file = File::open(path)?;
    parse_event_log(BufReader::new(file))
}

pub fn parse_event_log(reader: impl BufRead) -> Result<Vec<LoggedEvent>, EventLogError> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line).map_err(|source| EventLogError::Parse {
            line: idx + 1,
            source,
        })?;
        entries.push(entry);
    }
    debug!(entries = entries.len(), "parsed event log");
    Ok(entries)
}
