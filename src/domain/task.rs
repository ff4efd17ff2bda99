use super::enums::TaskStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque task identifier. The local store mints UUID strings; the synced
/// store carries whatever identifier the document collaborator assigned.
pub type TaskId = String;

/// A task on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, immutable after creation
    pub id: TaskId,
    /// Display name
    pub name: String,
    /// Planned duration in minutes
    pub estimated_minutes: u32,
    /// Calendar date the task is planned for (date only)
    pub scheduled_date: NaiveDate,
    /// Current board column
    pub status: TaskStatus,
    /// Set by the complete operation, never by a plain move
    pub completed: bool,
    /// Accumulated work in whole minutes
    pub time_spent: u32,
    /// When the task was created, used only for ordering
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh task in the Week column
    pub fn new(id: TaskId, name: String, estimated_minutes: u32, scheduled_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            estimated_minutes,
            scheduled_date,
            status: TaskStatus::Week,
            completed: false,
            time_spent: 0,
            created_at: Utc::now(),
        }
    }

    /// Mark as done, crediting whole minutes out of `additional_seconds`
    pub fn complete(&mut self, additional_seconds: u32) {
        self.status = TaskStatus::Done;
        self.completed = true;
        self.time_spent += additional_seconds / 60;
    }

    /// Planned duration in seconds, for seeding the focus timer
    pub fn estimate_seconds(&self) -> u32 {
        self.estimated_minutes * 60
    }
}
