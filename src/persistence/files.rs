use super::error::StoreError;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both the local and the home-level one
pub const DATA_DIR_NAME: &str = ".tasktrack";

/// Get the data directory - checks for a local .tasktrack first, then falls back to ~/.tasktrack
pub fn get_data_dir() -> Result<PathBuf, StoreError> {
    let current_dir = env::current_dir().map_err(|e| StoreError::io(".", e))?;

    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find a local data directory by walking up the directory tree
fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf, StoreError> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    }
    Ok(dir)
}

/// Initialize a local data directory in `parent`
pub fn init_local_data_dir(parent: &Path) -> Result<PathBuf, StoreError> {
    let dir = parent.join(DATA_DIR_NAME);

    if dir.exists() {
        return Err(StoreError::AlreadyExists(dir));
    }

    fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    Ok(dir)
}

/// Path of the task list inside a data directory
pub fn tasks_file(dir: &Path) -> PathBuf {
    dir.join("tasks.json")
}

/// Path of the preferences file inside a data directory
pub fn meta_file(dir: &Path) -> PathBuf {
    dir.join("meta.json")
}

/// Path of the log file inside a data directory
pub fn log_file(dir: &Path) -> PathBuf {
    dir.join("tasktrack.log")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StoreError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::io(temp_file.path(), e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp_file.path(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| StoreError::io(path, e))
}
