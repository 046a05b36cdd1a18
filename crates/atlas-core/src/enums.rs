//! Status and location-type enums for Atlas.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// LocationType
// ---------------------------------------------------------------------------

/// Semantic category of a map location.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Region,
    City,
    Town,
    Fortress,
    Ruins,
    Wilderness,
    Water,
    Poi,
}

impl LocationType {
    pub const ALL: [Self; 8] = [
        Self::Region,
        Self::City,
        Self::Town,
        Self::Fortress,
        Self::Ruins,
        Self::Wilderness,
        Self::Water,
        Self::Poi,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::City => "city",
            Self::Town => "town",
            Self::Fortress => "fortress",
            Self::Ruins => "ruins",
            Self::Wilderness => "wilderness",
            Self::Water => "water",
            Self::Poi => "poi",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntryStatus
// ---------------------------------------------------------------------------

/// Curation status of a lore entry in the work queue.
///
/// ```text
/// pending → pinned  → pending (undo)
///         → skipped → pending (undo)
///                   → pinned
/// ```
///
/// A pinned entry cannot be skipped directly: its pin must be undone first so
/// that the pinned store never holds an id whose status is not `pinned`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Pending,
    Pinned,
    Skipped,
}

impl EntryStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Pinned, Self::Skipped],
            Self::Pinned => &[Self::Pending],
            Self::Skipped => &[Self::Pending, Self::Pinned],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    ///
    /// Re-pinning an already pinned entry is allowed so that coordinates can
    /// be corrected without an undo round-trip.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        (self == Self::Pinned && next == Self::Pinned) || self.allowed_next_states().contains(&next)
    }

    /// Whether an operator decision has been recorded for this entry.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        matches!(self, Self::Pinned | Self::Skipped)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pinned => "pinned",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
