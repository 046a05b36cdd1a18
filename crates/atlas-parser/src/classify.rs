//! Type and zoom classification for lore entries.
//!
//! Type is decided by three layered heuristics, each an ordered table where
//! the first match wins:
//! 1. the entry's tags, in declared order, looked up in [`TAG_TYPES`]
//! 2. the content preview, tested against [`CONTENT_PATTERNS`] in order
//! 3. the header level
//!
//! Zoom is a pure function of header level.

use std::sync::LazyLock;

use atlas_core::enums::LocationType;
use regex::Regex;

use crate::error::ParserError;

/// Tag → type lookup.
pub const TAG_TYPES: &[(&str, LocationType)] = &[
    // Water
    ("sea", LocationType::Water),
    ("ocean", LocationType::Water),
    ("lake", LocationType::Water),
    ("river", LocationType::Water),
    ("bay", LocationType::Water),
    ("strait", LocationType::Water),
    ("water", LocationType::Water),
    // Dungeon-like
    ("dungeon", LocationType::Poi),
    ("crypt", LocationType::Poi),
    ("lair", LocationType::Poi),
    ("tomb", LocationType::Poi),
    ("cavern", LocationType::Poi),
    ("catacomb", LocationType::Poi),
    // Ruins
    ("ruins", LocationType::Ruins),
    ("ruin", LocationType::Ruins),
    ("abandoned", LocationType::Ruins),
    ("ancient", LocationType::Ruins),
    // Fortress
    ("fortress", LocationType::Fortress),
    ("fort", LocationType::Fortress),
    ("castle", LocationType::Fortress),
    ("stronghold", LocationType::Fortress),
    ("military", LocationType::Fortress),
    // Temple
    ("temple", LocationType::Poi),
    ("shrine", LocationType::Poi),
    ("magical", LocationType::Poi),
    ("portal", LocationType::Poi),
    ("sacred", LocationType::Poi),
    // City
    ("city", LocationType::City),
    ("capital", LocationType::City),
    ("citystate", LocationType::City),
    ("metropolis", LocationType::City),
    // Town
    ("settlement", LocationType::Town),
    ("village", LocationType::Town),
    ("town", LocationType::Town),
    ("hamlet", LocationType::Town),
    ("outpost", LocationType::Town),
    // Wilderness
    ("forest", LocationType::Wilderness),
    ("jungle", LocationType::Wilderness),
    ("swamp", LocationType::Wilderness),
    ("rainforest", LocationType::Wilderness),
    ("woods", LocationType::Wilderness),
    // Terrain
    ("mountains", LocationType::Wilderness),
    ("mountain", LocationType::Wilderness),
    ("hills", LocationType::Wilderness),
    ("plains", LocationType::Wilderness),
    ("desert", LocationType::Wilderness),
    ("cliffs", LocationType::Wilderness),
    ("canyon", LocationType::Wilderness),
    ("valley", LocationType::Wilderness),
    ("peaks", LocationType::Wilderness),
    // Region
    ("state", LocationType::Region),
    ("nation", LocationType::Region),
    ("region", LocationType::Region),
    ("island", LocationType::Region),
    ("archipelago", LocationType::Region),
    ("continent", LocationType::Region),
    ("poi", LocationType::Poi),
];

/// Content pattern → type, tested in this order against the preview.
pub const CONTENT_PATTERNS: &[(&str, LocationType)] = &[
    (
        r"(?i)\b(temple|shrine|sacred|holy|divine|altar)\b",
        LocationType::Poi,
    ),
    (
        r"(?i)\b(ruins?|ancient|abandoned|crumbl|decay|fallen)\b",
        LocationType::Ruins,
    ),
    (
        r"(?i)\b(dungeon|crypt|tomb|lair|cavern|catacomb)\b",
        LocationType::Poi,
    ),
    (
        r"(?i)\b(fortress|castle|fort|stronghold|citadel|keep)\b",
        LocationType::Fortress,
    ),
    (r"(?i)\b(capital|metropolis|great city)\b", LocationType::City),
    (
        r"(?i)\b(village|hamlet|settlement|small town)\b",
        LocationType::Town,
    ),
    (
        r"(?i)\b(forest|jungle|swamp|marsh|woods|grove)\b",
        LocationType::Wilderness,
    ),
    (
        r"(?i)\b(mountain|peak|hill|canyon|valley|cliff|ridge)\b",
        LocationType::Wilderness,
    ),
    (
        r"(?i)\b(sea|ocean|lake|river|bay|strait|gulf|waters)\b",
        LocationType::Water,
    ),
];

static COMPILED_PATTERNS: LazyLock<Vec<(Regex, LocationType)>> = LazyLock::new(|| {
    CONTENT_PATTERNS
        .iter()
        .filter_map(|(pattern, ty)| match Regex::new(pattern) {
            Ok(re) => Some((re, *ty)),
            Err(error) => {
                tracing::error!(%error, pattern, "content pattern failed to compile");
                None
            }
        })
        .collect()
});

/// Look up a single tag.
#[must_use]
pub fn type_for_tag(tag: &str) -> Option<LocationType> {
    let tag = tag.to_lowercase();
    TAG_TYPES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, ty)| *ty)
}

/// Suggest a location type from tags, content preview, and header level.
#[must_use]
pub fn suggest_type(tags: &[String], content_preview: &str, header_level: u8) -> LocationType {
    if let Some(ty) = tags.iter().find_map(|tag| type_for_tag(tag)) {
        return ty;
    }

    if let Some((_, ty)) = COMPILED_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(content_preview))
    {
        return *ty;
    }

    match header_level {
        0..=2 => LocationType::Region,
        3 => LocationType::City,
        4 => LocationType::Town,
        _ => LocationType::Poi,
    }
}

/// Map a header level to the zoom level at which the location appears.
///
/// # Errors
///
/// Returns [`ParserError::InvalidHeaderLevel`] for levels outside 1–6.
pub fn suggest_zoom(header_level: u8) -> Result<u8, ParserError> {
    match header_level {
        1..=5 => Ok(header_level),
        6 => Ok(5),
        other => Err(ParserError::InvalidHeaderLevel(other)),
    }
}
