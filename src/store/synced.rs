use super::{StoreError, TaskDraft, TaskStore};
use crate::domain::{Task, TaskId, TaskStatus};
use crate::remote::{DocumentClient, TaskDocument, TaskPatch};
use tracing::error;

/// Per-user synced task store: an in-memory mirror of the remote document
/// collection plus pass-through CRUD calls. The mirror is the source of
/// truth for views and is kept in the collaborator's order, creation time
/// descending (newest first). Remote failures are logged and surfaced;
/// the mirror is not rolled back, leaving the two views temporarily
/// inconsistent until the next snapshot push.
pub struct SyncedStore<C: DocumentClient> {
    client: C,
    tasks: Vec<Task>,
}

impl<C: DocumentClient> SyncedStore<C> {
    /// Empty mirror; the first snapshot push fills it
    pub fn new(client: C) -> Self {
        Self {
            client,
            tasks: Vec::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: DocumentClient> TaskStore for SyncedStore<C> {
    fn add_task(&mut self, draft: &TaskDraft) -> Result<TaskId, StoreError> {
        let new = draft.validate()?;
        let doc = TaskDocument::new(new.name, new.estimated_minutes, new.scheduled_date);

        let id = self.client.create(&doc).map_err(|err| {
            error!(%err, "failed to create remote task");
            StoreError::Backend(err)
        })?;

        // Newest first, matching the collaborator's collection order
        self.tasks.insert(0, doc.into_task(id.clone()));
        Ok(id)
    }

    fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        self.tasks.remove(pos);
        self.client.delete(id).map_err(|err| {
            error!(%err, task = id, "failed to delete remote task");
            StoreError::Backend(err)
        })
    }

    fn move_task(&mut self, id: &str, new_status: TaskStatus) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.status = new_status;
        self.client
            .update(id, &TaskPatch::Status(new_status))
            .map_err(|err| {
                error!(%err, task = id, "failed to move remote task");
                StoreError::Backend(err)
            })
    }

    fn complete_task(&mut self, id: &str, additional_seconds: u32) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.complete(additional_seconds);
        let patch = TaskPatch::Completion {
            status: task.status,
            completed: task.completed,
            time_spent: task.time_spent,
        };
        self.client.update(id, &patch).map_err(|err| {
            error!(%err, task = id, "failed to complete remote task");
            StoreError::Backend(err)
        })
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
