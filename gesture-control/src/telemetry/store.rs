//! Telemetry sinks

use super::GestureLog;
use crate::{Error, Result};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append-only storage for gesture logs
pub trait TelemetryStore: Send + Sync {
    fn append(&self, log: &GestureLog) -> Result<()>;

    /// Every stored record, oldest first
    fn load_all(&self) -> Result<Vec<GestureLog>>;
}

/// Gesture logs as one JSON object per line
#[derive(Debug)]
pub struct JsonlTelemetryStore {
    path: PathBuf,
    // Serializes appends from concurrent writers
    lock: Mutex<()>,
}

impl JsonlTelemetryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a JSON-lines log. Malformed lines are skipped with a warning.
    pub fn read_file(path: &Path) -> Result<Vec<GestureLog>> {
        let file = match fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut logs = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<GestureLog>(&line) {
                Ok(log) => logs.push(log),
                Err(e) => warn!("Skipping malformed telemetry line {}: {}", idx + 1, e),
            }
        }
        Ok(logs)
    }
}

impl TelemetryStore for JsonlTelemetryStore {
    fn append(&self, log: &GestureLog) -> Result<()> {
        let line = serde_json::to_string(log)?;
        let _guard = self.lock.lock();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::Telemetry(format!("cannot open {}: {}", self.path.display(), e))
            })?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<GestureLog>> {
        let _guard = self.lock.lock();
        Self::read_file(&self.path)
    }
}

/// Gesture logs kept in memory
#[derive(Debug, Default)]
pub struct MemoryTelemetryStore {
    logs: Mutex<Vec<GestureLog>>,
}

impl MemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.logs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.lock().is_empty()
    }
}

impl TelemetryStore for MemoryTelemetryStore {
    fn append(&self, log: &GestureLog) -> Result<()> {
        self.logs.lock().push(log.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<GestureLog>> {
        Ok(self.logs.lock().clone())
    }
}
