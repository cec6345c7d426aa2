//! History persistence: the whole sequence of records lives in one JSON
//! document, rewritten on every mutation. Expected volumes are small (tens to
//! low hundreds of records), so whole-document writes are fine.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::warn;

use crate::analysis::result::AnalysisResult;

/// Raw-document persistence. `load` returns `None` when nothing has been
/// stored yet; `save` overwrites the whole document.
pub trait HistoryBackend: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, raw: &str) -> Result<()>;
}

/// File-backed storage: one JSON file holding the serialized history array.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl HistoryBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    fn save(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// In-memory backend for tests and ephemeral deployments.
#[derive(Default)]
pub struct InMemoryBackend {
    raw: Mutex<Option<String>>,
}

impl HistoryBackend for InMemoryBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .raw
            .lock()
            .expect("history backend lock poisoned")
            .clone())
    }

    fn save(&self, raw: &str) -> Result<()> {
        *self.raw.lock().expect("history backend lock poisoned") = Some(raw.to_string());
        Ok(())
    }
}

/// Ordered history of analysis records, most-recent-first.
///
/// Every mutation is a read-modify-write of the whole sequence, serialized by
/// an in-process mutex. Two processes sharing one file can still clobber each
/// other's last write; that race is an accepted limitation of the
/// single-writer design.
pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
    guard: Mutex<()>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self {
            backend,
            guard: Mutex::new(()),
        }
    }

    /// Returns all records, most recent first.
    pub fn list(&self) -> Result<Vec<AnalysisResult>> {
        let _guard = self.guard.lock().expect("history lock poisoned");
        self.read_all()
    }

    /// Prepends one record and rewrites the sequence. Unconditional; no
    /// de-duplication by content.
    pub fn add(&self, result: AnalysisResult) -> Result<()> {
        let _guard = self.guard.lock().expect("history lock poisoned");
        let mut records = self.read_all()?;
        records.insert(0, result);
        self.write_all(&records)
    }

    /// Removes the record with the given id, if present. Removing an unknown
    /// id is a no-op, not an error.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.guard.lock().expect("history lock poisoned");
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }

    /// Loads the stored sequence. A document that fails to parse is recovered
    /// by resetting the store to empty; the reset is written back.
    fn read_all(&self) -> Result<Vec<AnalysisResult>> {
        let Some(raw) = self.backend.load()? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("stored history failed to parse, resetting to empty: {e}");
                self.write_all(&[])?;
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, records: &[AnalysisResult]) -> Result<()> {
        let raw = serde_json::to_string(records).context("failed to serialize history")?;
        self.backend.save(&raw)
    }
}
