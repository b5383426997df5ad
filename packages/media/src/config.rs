use std::path::PathBuf;

use serde::Deserialize;

/// Media storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Base directory holding the `tracks/` and `images/` subtrees. Default: "./files".
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Maximum accepted request body for media uploads, in bytes. Default: 32 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_root() -> PathBuf {
    PathBuf::from("./files")
}
fn default_max_upload_size() -> u64 {
    32 * 1024 * 1024
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_upload_size: default_max_upload_size(),
        }
    }
}
