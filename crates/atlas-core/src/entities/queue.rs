use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::LoreEntry;
use crate::enums::EntryStatus;

/// Current on-disk format version of the work queue.
pub const WORK_QUEUE_VERSION: u32 = 1;

const fn default_version() -> u32 {
    WORK_QUEUE_VERSION
}

/// The full parsed entry list plus per-entry curation status and a review cursor.
///
/// Rebuilt wholesale by every extraction run; prior decisions are carried
/// over by id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkQueue {
    #[serde(default = "default_version")]
    pub version: u32,
    pub extracted_at: DateTime<Utc>,
    pub source_files: Vec<String>,
    pub entries: Vec<LoreEntry>,
    /// Review cursor. Mutations reset it to the first pending entry (0 when
    /// none is pending); `jump` and `back` move it elsewhere.
    #[serde(default)]
    pub current_index: usize,
}

impl WorkQueue {
    /// Position of the first entry still pending, in file-then-line order.
    #[must_use]
    pub fn first_pending(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.status == EntryStatus::Pending)
    }

    /// Recompute `current_index` from entry statuses.
    pub fn refresh_cursor(&mut self) {
        self.current_index = self.first_pending().unwrap_or(0);
    }

    /// The review cursor: `current_index` while it names a pending entry
    /// (as left by a jump), otherwise the first pending entry.
    #[must_use]
    pub fn cursor_position(&self) -> Option<usize> {
        match self.entries.get(self.current_index) {
            Some(entry) if entry.status == EntryStatus::Pending => Some(self.current_index),
            _ => self.first_pending(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> QueueStats {
        QueueStats::from_entries(&self.entries)
    }
}

/// Per-status entry counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QueueStats {
    pub total: usize,
    pub pending: usize,
    pub pinned: usize,
    pub skipped: usize,
}

impl QueueStats {
    #[must_use]
    pub fn from_entries(entries: &[LoreEntry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match entry.status {
                EntryStatus::Pending => stats.pending += 1,
                EntryStatus::Pinned => stats.pinned += 1,
                EntryStatus::Skipped => stats.skipped += 1,
            }
        }
        stats
    }
}
