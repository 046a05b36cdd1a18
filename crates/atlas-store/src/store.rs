//! Whole-document JSON stores inside the data directory.
//!
//! Every document is read in full at stage start and written in full at
//! stage end. Writes go to a sibling `*.json.tmp` file that is then renamed
//! over the target, so a concurrent reader sees either the old document or
//! the new one and a crash never leaves a half-written file behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use atlas_core::entities::{AmbiguousReference, Location, PinnedData, WorkQueue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::lock::DataDirLock;

pub const WORK_QUEUE_FILE: &str = "work-queue.json";
pub const PINNED_FILE: &str = "pinned.json";
pub const LOCATIONS_FILE: &str = "locations.json";
pub const AMBIGUOUS_FILE: &str = "ambiguous-references.json";

const RUN_EXTRACT_FIRST: &str = "Run `atlas extract` first.";

/// Handle on the data directory holding every pipeline document.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Take the single-writer lock on this store for `command`.
    ///
    /// # Errors
    ///
    /// See [`DataDirLock::acquire`].
    pub fn lock(&self, command: &str) -> Result<DataDirLock, StoreError> {
        DataDirLock::acquire(&self.data_dir, command)
    }

    #[must_use]
    pub fn work_queue_path(&self) -> PathBuf {
        self.data_dir.join(WORK_QUEUE_FILE)
    }

    #[must_use]
    pub fn pinned_path(&self) -> PathBuf {
        self.data_dir.join(PINNED_FILE)
    }

    #[must_use]
    pub fn locations_path(&self) -> PathBuf {
        self.data_dir.join(LOCATIONS_FILE)
    }

    #[must_use]
    pub fn ambiguous_path(&self) -> PathBuf {
        self.data_dir.join(AMBIGUOUS_FILE)
    }

    /// The previous work queue, if an extraction has run before.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the file exists but cannot be parsed.
    pub fn load_work_queue(&self) -> Result<Option<WorkQueue>, StoreError> {
        read_json(&self.work_queue_path())
    }

    /// The work queue, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingStage`] when no extraction has run.
    pub fn require_work_queue(&self) -> Result<WorkQueue, StoreError> {
        let path = self.work_queue_path();
        read_json(&path)?.ok_or(StoreError::MissingStage {
            path,
            hint: RUN_EXTRACT_FIRST,
        })
    }

    /// The pinned store, treating an absent file as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the file exists but cannot be parsed.
    pub fn load_pinned(&self) -> Result<PinnedData, StoreError> {
        Ok(read_json(&self.pinned_path())?.unwrap_or_default())
    }

    /// The pinned store, which must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingStage`] when no extraction has run.
    pub fn require_pinned(&self) -> Result<PinnedData, StoreError> {
        let path = self.pinned_path();
        read_json(&path)?.ok_or(StoreError::MissingStage {
            path,
            hint: RUN_EXTRACT_FIRST,
        })
    }

    /// Write an empty pinned store if none exists yet. Returns whether a
    /// file was created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub fn ensure_pinned_initialized(&self) -> Result<bool, StoreError> {
        if self.pinned_path().exists() {
            return Ok(false);
        }
        self.save_pinned(&PinnedData::new())?;
        tracing::info!(path = %self.pinned_path().display(), "initialised empty pinned store");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] on write failure.
    pub fn save_work_queue(&self, queue: &WorkQueue) -> Result<(), StoreError> {
        write_json(&self.work_queue_path(), queue)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] on write failure.
    pub fn save_pinned(&self, pinned: &PinnedData) -> Result<(), StoreError> {
        write_json(&self.pinned_path(), pinned)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] on write failure.
    pub fn save_locations(&self, locations: &[Location]) -> Result<(), StoreError> {
        write_json(&self.locations_path(), &locations)
    }

    /// Write the ambiguous-reference report. An empty report writes nothing
    /// and leaves any earlier report in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] on write failure.
    pub fn save_ambiguous(&self, references: &[AmbiguousReference]) -> Result<bool, StoreError> {
        if references.is_empty() {
            return Ok(false);
        }
        write_json(&self.ambiguous_path(), &references)?;
        Ok(true)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    tracing::debug!(path = %path.display(), "wrote store document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::entities::PinnedLocation;
    use atlas_core::enums::LocationType;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn store() -> (tempfile::TempDir, DataStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DataStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn absent_documents() {
        let (_dir, store) = store();
        assert!(store.load_work_queue().unwrap().is_none());
        assert!(store.load_pinned().unwrap().is_empty());

        let err = store.require_work_queue().unwrap_err();
        assert!(matches!(err, StoreError::MissingStage { .. }));
        assert!(err.to_string().contains("work-queue.json not found"));
        assert!(matches!(
            store.require_pinned().unwrap_err(),
            StoreError::MissingStage { .. }
        ));
    }

    #[test]
    fn pinned_round_trips_and_leaves_no_temp_file() {
        let (_dir, store) = store();
        let mut pinned = PinnedData::new();
        pinned.insert(
            "7".into(),
            PinnedLocation {
                coordinates: [120.5, 88.0],
                zoom_level: 3,
                location_type: LocationType::City,
                pinned_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            },
        );
        store.save_pinned(&pinned).unwrap();

        assert_eq!(store.load_pinned().unwrap(), pinned);
        assert!(!store.data_dir().join("pinned.json.tmp").exists());
        let raw = fs::read_to_string(store.pinned_path()).unwrap();
        assert!(raw.contains("\"zoomLevel\": 3"));
        assert!(raw.contains("\"type\": \"city\""));
    }

    #[test]
    fn ensure_pinned_initialized_only_once() {
        let (_dir, store) = store();
        assert!(store.ensure_pinned_initialized().unwrap());
        assert_eq!(fs::read_to_string(store.pinned_path()).unwrap(), "{}\n");
        assert!(!store.ensure_pinned_initialized().unwrap());
    }

    #[test]
    fn malformed_json_is_reported_with_path() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.pinned_path(), "{ not json").unwrap();
        let err = store.load_pinned().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains("pinned.json"));
    }

    #[test]
    fn empty_ambiguous_report_is_not_written() {
        let (_dir, store) = store();
        assert!(!store.save_ambiguous(&[]).unwrap());
        assert!(!store.ambiguous_path().exists());
    }
}
