use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::LocationType;

/// `[x, y]` in map pixel coordinates.
pub type Coordinates = [f64; 2];

/// A human-supplied curation record for one entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedLocation {
    pub coordinates: Coordinates,
    pub zoom_level: u8,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub pinned_at: DateTime<Utc>,
}

/// The authoritative curation store, keyed by entry id.
///
/// Presence of an id here always implies that entry's status is `pinned`.
pub type PinnedData = BTreeMap<String, PinnedLocation>;
