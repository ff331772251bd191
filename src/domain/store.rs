use super::task::{Task, TaskDraft, TaskUpdate};
use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, warn};

// Reducers. Each returns the new task list, or None when the operation changes nothing.

/// Append a task built from `draft`. Blank titles are ignored.
pub fn add_task(tasks: &[Task], draft: &TaskDraft, now: DateTime<Local>) -> Option<Vec<Task>> {
    if !draft.is_valid() {
        return None;
    }

    let id = next_id(tasks, now.timestamp_millis());
    let mut next = tasks.to_vec();
    next.push(Task::from_draft(id, draft));
    Some(next)
}

/// Replace the fields in `update` on the task with `id`
pub fn update_task(tasks: &[Task], id: i64, update: &TaskUpdate) -> Option<Vec<Task>> {
    let index = tasks.iter().position(|t| t.id == id)?;
    let mut next = tasks.to_vec();
    next[index].apply(update);
    if next[index] == tasks[index] {
        return None;
    }
    Some(next)
}

/// Start or stop the timer of the task with `id`
pub fn toggle_timer(tasks: &[Task], id: i64, now: DateTime<Local>) -> Option<Vec<Task>> {
    let index = tasks.iter().position(|t| t.id == id)?;
    let mut next = tasks.to_vec();
    next[index].toggle_timer(now);
    Some(next)
}

/// Clock-derived id, bumped past the current maximum if it is already taken
fn next_id(tasks: &[Task], candidate: i64) -> i64 {
    if tasks.iter().any(|t| t.id == candidate) {
        let max = tasks.iter().map(|t| t.id).max().unwrap_or(candidate);
        max + 1
    } else {
        candidate
    }
}

/// Receives the full task list after every committed change
pub trait TaskObserver {
    fn on_change(&mut self, tasks: &[Task]) -> Result<()>;
}

/// Owns the task list and notifies observers once per committed mutation
#[derive(Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    observers: Vec<Box<dyn TaskObserver>>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn TaskObserver>) {
        self.observers.push(observer);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task. Returns the new id, or None when the draft was rejected.
    pub fn add(&mut self, draft: &TaskDraft, now: DateTime<Local>) -> Result<Option<i64>> {
        match add_task(&self.tasks, draft, now) {
            Some(next) => {
                let id = next.last().map(|t| t.id);
                self.commit(next)?;
                Ok(id)
            }
            None => {
                debug!("Ignoring task with blank title");
                Ok(None)
            }
        }
    }

    /// Update fields of a task. Returns whether anything changed.
    pub fn update(&mut self, id: i64, update: &TaskUpdate) -> Result<bool> {
        match update_task(&self.tasks, id, update) {
            Some(next) => {
                self.commit(next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Toggle the timer of a task. Returns whether a task matched.
    pub fn toggle_timer(&mut self, id: i64, now: DateTime<Local>) -> Result<bool> {
        match toggle_timer(&self.tasks, id, now) {
            Some(next) => {
                self.commit(next)?;
                Ok(true)
            }
            None => {
                debug!("No task with id {} to toggle", id);
                Ok(false)
            }
        }
    }

    /// Install the new list, then notify every observer. The first observer
    /// error is returned after all observers have run; the new state is kept.
    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        self.tasks = next;
        debug!("Committed {} tasks", self.tasks.len());

        let mut first_error = None;
        for observer in &mut self.observers {
            if let Err(e) = observer.on_change(&self.tasks) {
                warn!("Task observer failed: {:#}", e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
