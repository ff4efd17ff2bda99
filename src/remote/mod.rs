pub mod auth;

pub use auth::{AuthError, AuthState, IdentityClient, UserId};

use crate::domain::{Task, TaskId, TaskStatus};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

/// A task as handed to the document collaborator: everything but the id,
/// which the collaborator assigns on create.
#[derive(Debug, Clone)]
pub struct TaskDocument {
    pub name: String,
    pub estimated_minutes: u32,
    pub scheduled_date: NaiveDate,
    pub status: TaskStatus,
    pub completed: bool,
    pub time_spent: u32,
    pub created_at: DateTime<Utc>,
}

impl TaskDocument {
    /// Document for a freshly added task
    pub fn new(name: String, estimated_minutes: u32, scheduled_date: NaiveDate) -> Self {
        Self {
            name,
            estimated_minutes,
            scheduled_date,
            status: TaskStatus::Week,
            completed: false,
            time_spent: 0,
            created_at: Utc::now(),
        }
    }

    /// Combine with the collaborator-assigned id into a live task
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            name: self.name,
            estimated_minutes: self.estimated_minutes,
            scheduled_date: self.scheduled_date,
            status: self.status,
            completed: self.completed,
            time_spent: self.time_spent,
            created_at: self.created_at,
        }
    }
}

/// Field-level update sent to the document collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPatch {
    /// A plain move between columns
    Status(TaskStatus),
    /// The complete operation: status, completion flag, and the new
    /// absolute time-spent value
    Completion {
        status: TaskStatus,
        completed: bool,
        time_spent: u32,
    },
}

/// Per-user ordered document collection, addressable by task id. The live
/// subscription side is modeled as `Event::TasksSnapshot` pushes carrying
/// the full collection in creation-time-descending order.
pub trait DocumentClient {
    /// Create a document; returns the collaborator-assigned id.
    fn create(&mut self, doc: &TaskDocument) -> Result<TaskId>;

    /// Apply a field update to an existing document.
    fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<()>;

    /// Delete a document.
    fn delete(&mut self, id: &str) -> Result<()>;
}
