use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntryStatus, LocationType};

/// One header-delimited unit of source lore text, pre-curation.
///
/// `id` is assigned once, at first extraction, from a run-wide counter and is
/// the key used by the pinned store. `suggested_type` and
/// `suggested_zoom_level` are advisory only; a pin overrides both.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoreEntry {
    pub id: String,
    pub name: String,
    pub header_level: u8,
    pub header_text: String,
    /// 1-indexed source line of the header.
    pub line_number: usize,
    pub source_file: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub suggested_type: LocationType,
    pub suggested_zoom_level: u8,
    #[serde(default)]
    pub content_preview: String,
    pub parent_entry_id: Option<String>,
    #[serde(default)]
    pub status: EntryStatus,
}

impl LoreEntry {
    /// `"Name (file:line)"`, used wherever an entry is shown to a reviewer.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{} ({}:{})", self.name, self.source_file, self.line_number)
    }
}
