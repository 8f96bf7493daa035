//! Upload storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local upload storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Maximum upload size in bytes (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

impl StorageConfig {
    /// Directory where uploaded document files are written.
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_root).join("uploads")
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MB
}
