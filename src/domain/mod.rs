pub mod enums;
pub mod store;
pub mod task;
pub mod views;

pub use enums::{Priority, Status, UiMode, ViewMode};
pub use store::{TaskObserver, TaskStore};
pub use task::{format_time, Task, TaskDraft, TaskUpdate};
pub use views::{
    filter_tasks, iso_date, timer_action_label, timer_badge, weekly_dashboard, DayColumn,
};
