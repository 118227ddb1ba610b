use std::path::PathBuf;

use serde::Deserialize;

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Directory where uploaded files are stored
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Maximum accepted file size in bytes (25 MiB)
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            max_size_bytes: default_max_size(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("uploads")
}

const fn default_max_size() -> u64 {
    25 * 1024 * 1024
}
