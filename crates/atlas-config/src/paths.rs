//! Filesystem locations of the lore corpus and the pipeline data stores.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_lore_dir() -> String {
    "lore".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory holding the markdown corpus.
    #[serde(default = "default_lore_dir")]
    pub lore_dir: String,

    /// Directory holding `work-queue.json`, `pinned.json`, and finalize output.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            lore_dir: default_lore_dir(),
            data_dir: default_data_dir(),
        }
    }
}

impl PathsConfig {
    /// Corpus directory, resolved against `root` unless absolute.
    #[must_use]
    pub fn lore_dir_in(&self, root: &Path) -> PathBuf {
        resolve(root, &self.lore_dir)
    }

    /// Data directory, resolved against `root` unless absolute.
    #[must_use]
    pub fn data_dir_in(&self, root: &Path) -> PathBuf {
        resolve(root, &self.data_dir)
    }
}

fn resolve(root: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
