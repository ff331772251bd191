use super::error::StoreError;
use super::files::{atomic_write, read_file};
use crate::domain::ViewMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User preferences stored in meta.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// View shown when the UI starts
    #[serde(default)]
    pub default_view: ViewMode,
    /// File name used by CSV export when no path is given
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

fn default_export_file() -> String {
    "tasks.csv".to_string()
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            default_view: ViewMode::default(),
            export_file: default_export_file(),
        }
    }
}

/// Load preferences from meta.json, defaults if the file doesn't exist
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<AppMetadata, StoreError> {
    let path = path.as_ref();

    match read_file(path)? {
        Some(content) => serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(AppMetadata::default()),
    }
}

/// Save preferences to meta.json
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(metadata)?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_metadata() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");

        let metadata = load_metadata(&meta_path).unwrap();
        assert_eq!(metadata.default_view, ViewMode::Daily);
        assert_eq!(metadata.export_file, "tasks.csv");
    }

    #[test]
    fn test_save_and_load_metadata() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");

        let metadata = AppMetadata {
            default_view: ViewMode::Weekly,
            export_file: "week.csv".to_string(),
        };
        save_metadata(&meta_path, &metadata).unwrap();

        assert_eq!(load_metadata(&meta_path).unwrap(), metadata);
    }

    #[test]
    fn test_partial_metadata_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");
        std::fs::write(&meta_path, r#"{"default_view":"monthly"}"#).unwrap();

        let metadata = load_metadata(&meta_path).unwrap();
        assert_eq!(metadata.default_view, ViewMode::Monthly);
        assert_eq!(metadata.export_file, "tasks.csv");
    }

    #[test]
    fn test_unknown_view_falls_back_to_all() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");
        std::fs::write(&meta_path, r#"{"default_view":"yearly"}"#).unwrap();

        let metadata = load_metadata(&meta_path).unwrap();
        assert_eq!(metadata.default_view, ViewMode::All);
    }
}
