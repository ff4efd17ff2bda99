use super::enums::TaskStatus;
use super::task::Task;
use chrono::NaiveDate;

/// Column heading for the board
pub fn column_title(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Week => "Week",
        TaskStatus::Today => "Today",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Done => "Done",
    }
}

/// Column icon for the board
pub fn column_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Week => "📅",
        TaskStatus::Today => "☀️",
        TaskStatus::InProgress => "⚡",
        TaskStatus::Done => "✓",
    }
}

/// Placeholder shown when a column has no tasks
pub fn empty_message(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Week => "Add tasks for the week",
        TaskStatus::Today => "Move tasks here",
        TaskStatus::InProgress => "Start a task",
        TaskStatus::Done => "Completed tasks",
    }
}

/// Format seconds as an MM:SS clock
pub fn format_clock(total_seconds: u32) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format a scheduled date relative to today ("Today", "Tomorrow", "Aug 5")
pub fn format_scheduled_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today.succ_opt().unwrap_or(today) {
        "Tomorrow".to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Resolve a task by unique id prefix. Returns None when the prefix matches
/// no task or more than one.
pub fn find_by_prefix<'a>(tasks: &'a [Task], prefix: &str) -> Option<&'a Task> {
    if prefix.is_empty() {
        return None;
    }
    let mut matches = tasks.iter().filter(|t| t.id.starts_with(prefix));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}
