//! CLI response types returned as JSON by `atlas` commands.
//!
//! These structs define the output shape of `atlas extract`, `atlas finalize`,
//! and the curation commands (`status`, `pin`, `skip`, `jump`, `back`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{LoreEntry, QueueStats};

/// Review cursor state: the entry to curate next and overall progress.
///
/// Returned by `atlas status`, `atlas pin`, `atlas skip`, `atlas jump`, and
/// `atlas back`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CursorResponse {
    pub current_entry: Option<LoreEntry>,
    pub current_index: Option<usize>,
    pub stats: QueueStats,
}

/// Response from `atlas extract`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSummary {
    pub stats: QueueStats,
    pub current_index: usize,
    /// Suggested type distribution, most frequent first.
    pub by_type: Vec<(String, usize)>,
    /// Configured source files that were not found on disk.
    pub missing_files: Vec<String>,
    /// Pinned ids that no longer correspond to any parsed entry.
    pub orphaned_pins: Vec<String>,
}

/// Response from `atlas finalize`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeSummary {
    pub entries_loaded: usize,
    pub pins_loaded: usize,
    /// Names shared by more than one pinned entry.
    pub duplicate_names: usize,
    pub content_matched: usize,
    pub auto_resolved: usize,
    pub ambiguous: usize,
    pub locations: usize,
    /// Location count per zoom level, ascending zoom.
    pub by_zoom: Vec<(u8, usize)>,
    /// Location count per type, most frequent first.
    pub by_type: Vec<(String, usize)>,
    pub with_parent: usize,
    pub with_related: usize,
    pub total_related: usize,
}
