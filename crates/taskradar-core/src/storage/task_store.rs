//! Flat JSON task store.
//!
//! All tasks live in one JSON array at `<data_dir>/tasks.json`. Writes go to
//! a sibling temp file first and are renamed into place.
//!
//! Loading is lenient per entry: a record that fails validation (bad score,
//! label that disagrees with its scores) is skipped with a warning so the
//! remaining tasks still load. Inserts and deletes operate on the raw
//! records, so a skipped record stays on disk untouched. A file that is not
//! a JSON array at all is reported as corrupt.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::task::Task;

/// File name inside the data directory.
pub const TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Open the store in the data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(data_dir()?.join(TASKS_FILE)))
    }

    /// Open a store backed by an explicit file.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tasks in insertion order.
    pub fn list(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for (index, record) in self.read_records()?.into_iter().enumerate() {
            match serde_json::from_value::<Task>(record) {
                Ok(task) => tasks.push(task),
                Err(e) => tracing::warn!(index, error = %e, "skipping invalid task record"),
            }
        }
        Ok(tasks)
    }

    pub fn get(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    /// Append a task. Ids must be unique across every stored record,
    /// including ones that no longer validate.
    pub fn insert(&self, task: &Task) -> Result<()> {
        let mut records = self.read_records()?;
        if records.iter().any(|r| record_id(r) == Some(task.id.as_str())) {
            return Err(StorageError::DuplicateId(task.id.clone()).into());
        }
        records.push(serde_json::to_value(task)?);
        self.write_records(&records)?;
        tracing::info!(id = %task.id, priority = %task.priority(), "stored task");
        Ok(())
    }

    /// Remove a task by id. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records)?;
        tracing::info!(id, "deleted task");
        Ok(true)
    }

    /// Raw records as stored. Entries are not validated here, so writes
    /// carry records that fail to load through unchanged.
    fn read_records(&self) -> Result<Vec<serde_json::Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(records)
    }

    fn write_records(&self, records: &[serde_json::Value]) -> Result<()> {
        let write_failed = |source: std::io::Error| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        let content = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_failed)?;
        std::fs::rename(&tmp, &self.path).map_err(write_failed)?;
        Ok(())
    }
}

fn record_id(record: &serde_json::Value) -> Option<&str> {
    record.get("id").and_then(serde_json::Value::as_str)
}
