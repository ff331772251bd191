use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating, reading or writing the data directory
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored data in {} is not valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize data")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
