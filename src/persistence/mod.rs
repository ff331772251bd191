pub mod error;
pub mod files;
pub mod json_store;
pub mod metadata;

pub use error::StoreError;
pub use files::{atomic_write, ensure_data_dir, init_local_data_dir, log_file, meta_file, tasks_file};
pub use json_store::JsonStore;
pub use metadata::{load_metadata, save_metadata, AppMetadata};
