use super::{StoreError, TaskDraft, TaskStore};
use crate::domain::{Task, TaskId, TaskStatus};
use crate::persistence::SnapshotStore;
use anyhow::Result;
use tracing::error;
use uuid::Uuid;

/// Local-only task store: an in-memory collection backed by the
/// whole-collection snapshot file. Tasks keep plain insertion order
/// (oldest first); ids are locally minted UUIDs.
pub struct LocalStore {
    tasks: Vec<Task>,
    snapshot: Option<SnapshotStore>,
}

impl LocalStore {
    /// Open against a snapshot file, reading the collection once
    pub fn open(snapshot: SnapshotStore) -> Result<Self> {
        let tasks = snapshot.load()?;
        Ok(Self {
            tasks,
            snapshot: Some(snapshot),
        })
    }

    /// Ephemeral store with no backing file
    pub fn in_memory() -> Self {
        Self {
            tasks: Vec::new(),
            snapshot: None,
        }
    }

    /// Rewrite the snapshot after a mutation. The in-memory collection is
    /// the source of truth; a failed write is logged and surfaced without
    /// rolling anything back.
    fn persist(&self) -> Result<(), StoreError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        snapshot.save(&self.tasks).map_err(|err| {
            error!(%err, "failed to persist task snapshot");
            StoreError::Backend(err)
        })
    }
}

impl TaskStore for LocalStore {
    fn add_task(&mut self, draft: &TaskDraft) -> Result<TaskId, StoreError> {
        let new = draft.validate()?;
        let id = Uuid::new_v4().to_string();
        self.tasks.push(Task::new(
            id.clone(),
            new.name,
            new.estimated_minutes,
            new.scheduled_date,
        ));
        self.persist()?;
        Ok(id)
    }

    fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist()
    }

    fn move_task(&mut self, id: &str, new_status: TaskStatus) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.status = new_status;
        self.persist()
    }

    fn complete_task(&mut self, id: &str, additional_seconds: u32) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.complete(additional_seconds);
        self.persist()
    }

    fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn sync_snapshot(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}
