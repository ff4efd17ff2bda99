use crate::domain::Task;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use super::files::{atomic_write, read_file, tasks_file};

/// Whole-collection blob store. The task list is serialized as one JSON
/// document under a single fixed file, read once at startup and rewritten
/// in full after every mutation.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Snapshot store at the default location inside the data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(tasks_file()?))
    }

    /// Load the full collection. A missing or empty file is an empty board.
    pub fn load(&self) -> Result<Vec<Task>> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse task snapshot: {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded task snapshot");
        Ok(tasks)
    }

    /// Rewrite the full collection
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;
        atomic_write(&self.path, &json)?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved task snapshot");
        Ok(())
    }
}
