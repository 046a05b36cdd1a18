use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::enums::LocationType;

/// A final map location produced by the finalize stage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub coordinates: Coordinates,
    pub zoom_level: u8,
    /// Nearest pinned ancestor. Never an unpinned entry id.
    pub parent_id: Option<String>,
    /// Resolved cross-references. Never contains `id`.
    pub related_ids: Vec<String>,
    pub lore_file: String,
    pub tags: Vec<String>,
}

/// A detected name mention that could not be resolved to one target.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AmbiguousReference {
    pub source_id: String,
    pub source_name: String,
    /// The mentioned name, lowercased as indexed.
    pub mentioned_name: String,
    pub candidate_ids: Vec<String>,
    pub candidate_names: Vec<String>,
    /// Text surrounding the first mention.
    pub context: String,
}
