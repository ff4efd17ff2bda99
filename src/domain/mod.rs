pub mod enums;
pub mod task;
pub mod views;

pub use enums::TaskStatus;
pub use task::{Task, TaskId};
pub use views::{
    column_icon, column_title, empty_message, find_by_prefix, format_clock,
    format_scheduled_date,
};
