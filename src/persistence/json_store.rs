use super::error::StoreError;
use super::files::{atomic_write, read_file};
use crate::domain::{Task, TaskObserver};
use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Load the task list. A missing file is an empty list; malformed content is an error.
pub fn load_tasks<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, StoreError> {
    let path = path.as_ref();

    let Some(content) = read_file(path)? else {
        info!("No task file at {}, starting empty", path.display());
        return Ok(Vec::new());
    };

    let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Overwrite the task file with the full list
pub fn save_tasks<P: AsRef<Path>>(path: P, tasks: &[Task]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = serde_json::to_string(tasks)?;
    atomic_write(path, &json)?;
    debug!("Saved {} tasks to {}", tasks.len(), path.display());
    Ok(())
}

/// Mirrors the task list to disk on every committed change
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        load_tasks(&self.path)
    }
}

impl TaskObserver for JsonStore {
    fn on_change(&mut self, tasks: &[Task]) -> Result<()> {
        save_tasks(&self.path, tasks)?;
        Ok(())
    }
}
