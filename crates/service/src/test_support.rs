#![cfg(test)]
use std::path::PathBuf;

/// Unique scratch file path under the system temp dir.
pub fn temp_store_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.json", prefix, uuid::Uuid::new_v4()))
}
