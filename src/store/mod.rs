pub mod local;
pub mod synced;

pub use local::LocalStore;
pub use synced::SyncedStore;

use crate::domain::{Task, TaskId, TaskStatus};
use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Raw user input for a new task. Validated as a whole before anything
/// mutates, so a rejected draft leaves no partial state behind.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub name: String,
    pub estimated_minutes: String,
    pub scheduled_date: String,
}

impl TaskDraft {
    pub fn new(
        name: impl Into<String>,
        estimated_minutes: impl Into<String>,
        scheduled_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            estimated_minutes: estimated_minutes.into(),
            scheduled_date: scheduled_date.into(),
        }
    }

    /// Validate all fields, producing the typed creation input
    pub fn validate(&self) -> Result<NewTask, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let raw_estimate = self.estimated_minutes.trim();
        let estimated_minutes: u32 = raw_estimate
            .parse()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| ValidationError::InvalidEstimate(raw_estimate.to_string()))?;

        let scheduled_date = parse_scheduled_date(self.scheduled_date.trim())?;

        Ok(NewTask {
            name: name.to_string(),
            estimated_minutes,
            scheduled_date,
        })
    }
}

/// Parse a scheduled date: YYYY-MM-DD, or the conveniences "today" and
/// "tomorrow"
fn parse_scheduled_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let today = Local::now().date_naive();
    match raw.to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today
            .succ_opt()
            .ok_or_else(|| ValidationError::InvalidDate(raw.to_string())),
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string())),
    }
}

/// Validated input for the add operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub estimated_minutes: u32,
    pub scheduled_date: NaiveDate,
}

/// Rejections that happen before any state change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task name cannot be empty")]
    EmptyName,
    #[error("estimate must be a positive number of minutes, got {0:?}")]
    InvalidEstimate(String),
    #[error("unrecognized date {0:?} (expected YYYY-MM-DD, today, or tomorrow)")]
    InvalidDate(String),
}

/// Store operation failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage backend error: {0}")]
    Backend(anyhow::Error),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Backend(err)
    }
}

/// Board-level counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    /// Sum of per-task time spent, in minutes
    pub total_time_spent: u64,
}

/// Compute stats over a task collection
pub fn board_stats(tasks: &[Task]) -> BoardStats {
    BoardStats {
        total: tasks.len(),
        completed: tasks.iter().filter(|t| t.completed).count(),
        total_time_spent: tasks.iter().map(|t| u64::from(t.time_spent)).sum(),
    }
}

/// The task collection and its mutations. One contract, two variants:
/// [`LocalStore`] (whole-collection snapshot file) and [`SyncedStore`]
/// (per-user remote document collection). The session controller holds
/// either through this trait and cannot tell them apart.
pub trait TaskStore {
    /// Validate the draft and create a task in the Week column.
    /// Returns the new task's id.
    fn add_task(&mut self, draft: &TaskDraft) -> Result<TaskId, StoreError>;

    /// Remove a task. A missing id is a benign no-op.
    fn delete_task(&mut self, id: &str) -> Result<(), StoreError>;

    /// Set the status of a task. A missing id is a benign no-op. Never
    /// touches `completed` or `time_spent`.
    fn move_task(&mut self, id: &str, new_status: TaskStatus) -> Result<(), StoreError>;

    /// Mark a task done, crediting `floor(additional_seconds / 60)` minutes.
    /// A missing id is a benign no-op.
    fn complete_task(&mut self, id: &str, additional_seconds: u32) -> Result<(), StoreError>;

    /// Look up a task by id
    fn task(&self, id: &str) -> Option<&Task>;

    /// The whole collection in the store's stable order: the local variant
    /// keeps insertion order (oldest first), the synced variant mirrors the
    /// collaborator's creation-time-descending order (newest first).
    fn tasks(&self) -> &[Task];

    /// Tasks in one column, preserving the store's order
    fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks().iter().filter(|t| t.status == status).collect()
    }

    /// Board-level counters
    fn stats(&self) -> BoardStats {
        board_stats(self.tasks())
    }

    /// Replace the collection with an externally observed snapshot: a remote
    /// push for the synced variant, the startup load for the local one.
    fn sync_snapshot(&mut self, tasks: Vec<Task>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_accepts_plain_draft() {
        let draft = TaskDraft::new("Write report", "25", "2026-08-05");
        let new = draft.validate().unwrap();
        assert_eq!(new.name, "Write report");
        assert_eq!(new.estimated_minutes, 25);
        assert_eq!(new.scheduled_date.to_string(), "2026-08-05");
    }

    #[test]
    fn test_validate_trims_name() {
        let draft = TaskDraft::new("  Write report  ", "25", "2026-08-05");
        assert_eq!(draft.validate().unwrap().name, "Write report");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let draft = TaskDraft::new("   ", "25", "2026-08-05");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_validate_rejects_bad_estimates() {
        for bad in ["0", "-5", "abc", "", "2.5"] {
            let draft = TaskDraft::new("Task", bad, "2026-08-05");
            assert_eq!(
                draft.validate(),
                Err(ValidationError::InvalidEstimate(bad.to_string())),
                "estimate {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_dates() {
        for bad in ["yesterday", "08/05/2026", "2026-13-40", "soon"] {
            let draft = TaskDraft::new("Task", "25", bad);
            assert_eq!(
                draft.validate(),
                Err(ValidationError::InvalidDate(bad.to_string())),
                "date {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validate_accepts_relative_dates() {
        let today = Local::now().date_naive();
        let draft = TaskDraft::new("Task", "25", "today");
        assert_eq!(draft.validate().unwrap().scheduled_date, today);

        let draft = TaskDraft::new("Task", "25", "Tomorrow");
        assert_eq!(
            draft.validate().unwrap().scheduled_date,
            today.succ_opt().unwrap()
        );
    }

    #[test]
    fn test_board_stats_empty() {
        assert_eq!(board_stats(&[]), BoardStats::default());
    }
}
