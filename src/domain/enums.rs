use serde::{Deserialize, Serialize};

/// Board column a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Week,
    Today,
    #[serde(rename = "progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    /// Parse status from its wire tag like "progress"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "today" => Some(Self::Today),
            "progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Convert status to its wire tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Today => "today",
            Self::InProgress => "progress",
            Self::Done => "done",
        }
    }

    /// Check if tasks in this column are still open (not completed)
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Done)
    }

    /// All columns in board order
    pub fn all() -> &'static [TaskStatus] {
        &[Self::Week, Self::Today, Self::InProgress, Self::Done]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_from_tag() {
        assert_eq!(TaskStatus::from_tag("week"), Some(TaskStatus::Week));
        assert_eq!(TaskStatus::from_tag("today"), Some(TaskStatus::Today));
        assert_eq!(TaskStatus::from_tag("progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_tag("DONE"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::from_tag("invalid"), None);
    }

    #[test]
    fn test_task_status_to_tag() {
        assert_eq!(TaskStatus::Week.to_tag(), "week");
        assert_eq!(TaskStatus::InProgress.to_tag(), "progress");
        assert_eq!(TaskStatus::Done.to_tag(), "done");
    }

    #[test]
    fn test_task_status_is_open() {
        assert!(TaskStatus::Week.is_open());
        assert!(TaskStatus::Today.is_open());
        assert!(TaskStatus::InProgress.is_open());
        assert!(!TaskStatus::Done.is_open());
    }

    #[test]
    fn test_task_status_serde_tags() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"progress\"");
        let back: TaskStatus = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(back, TaskStatus::Week);
    }
}
