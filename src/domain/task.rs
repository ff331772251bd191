use super::enums::{Priority, Status};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A tracked task, stored exactly in this shape in tasks.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation time in milliseconds, unique within the store
    pub id: i64,
    pub title: String,
    /// `YYYY-MM-DD`, or empty when unscheduled
    pub due_date: String,
    pub priority: Priority,
    pub category: String,
    pub status: Status,
    /// Accumulated seconds, only grows when a running timer stops
    pub time_spent: u64,
    /// Millisecond timestamp of the running timer's start (None when stopped)
    pub start_time: Option<i64>,
}

impl Task {
    /// Build a fresh task from a draft. Status starts at Not Started with no timer.
    pub fn from_draft(id: i64, draft: &TaskDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            due_date: draft.due_date.clone(),
            priority: draft.priority,
            category: draft.category.clone(),
            status: Status::NotStarted,
            time_spent: draft.time_spent,
            start_time: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Start the timer if stopped, otherwise stop it and bank the whole seconds elapsed
    pub fn toggle_timer(&mut self, now: DateTime<Local>) {
        let now_ms = now.timestamp_millis();
        match self.start_time.take() {
            Some(started) => {
                self.time_spent += elapsed_seconds(started, now_ms);
            }
            None => {
                self.start_time = Some(now_ms);
            }
        }
    }

    /// Seconds the running timer has been going, not yet added to `time_spent`
    pub fn running_seconds(&self, now: DateTime<Local>) -> u64 {
        self.start_time
            .map(|started| elapsed_seconds(started, now.timestamp_millis()))
            .unwrap_or(0)
    }

    /// Apply every field present in `update`
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(due_date) = &update.due_date {
            self.due_date = due_date.clone();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    pub fn time_spent_formatted(&self) -> String {
        format_time(self.time_spent)
    }
}

/// Whole seconds between two millisecond timestamps. A clock that went backwards counts as zero.
fn elapsed_seconds(start_ms: i64, now_ms: i64) -> u64 {
    let delta = now_ms.saturating_sub(start_ms);
    if delta <= 0 {
        0
    } else {
        (delta / 1000) as u64
    }
}

/// Format seconds as "Xm Ys" (minutes are not rolled into hours)
pub fn format_time(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Input buffer for a task that has not been added yet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub due_date: String,
    pub priority: Priority,
    pub category: String,
    pub time_spent: u64,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// A draft can be added only if its title has non-whitespace content
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Field replacements for an existing task. `None` leaves the field as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub status: Option<Status>,
}

impl TaskUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }
}
