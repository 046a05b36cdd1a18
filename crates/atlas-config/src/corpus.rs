//! Corpus selection: which documents are extracted, and which headers are structural.

use serde::{Deserialize, Serialize};

/// Continent/region documents processed by default, in processing order.
pub const DEFAULT_SOURCE_FILES: &[&str] = &[
    "Ve.md",
    "Clueanda.md",
    "Aboyinzu.md",
    "Rimihuica.md",
    "Upoceax.md",
    "Western_Isles.md",
    "Greenwater_Isles.md",
    "City_States.md",
];

/// Section headers that describe document structure, not places.
pub const DEFAULT_SKIP_HEADERS: &[&str] = &[
    "geography",
    "political climate",
    "what makes it interesting",
    "what will go wrong",
    "government & peoples",
    "economy",
    "military",
    "political geography",
    "primary conflicts",
    "history",
    "culture",
    "religion",
    "notable figures",
    "notable locations",
    "settlements",
    "features",
    "overview",
    "surrounding waters",
    "continental layout",
    "todo",
];

fn default_source_files() -> Vec<String> {
    DEFAULT_SOURCE_FILES.iter().map(ToString::to_string).collect()
}

fn default_skip_headers() -> Vec<String> {
    DEFAULT_SKIP_HEADERS.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Documents to extract, relative to `paths.lore_dir`, in processing order.
    #[serde(default = "default_source_files")]
    pub source_files: Vec<String>,

    /// Case-insensitive header names that never become entries.
    #[serde(default = "default_skip_headers")]
    pub skip_headers: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source_files: default_source_files(),
            skip_headers: default_skip_headers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = CorpusConfig::default();
        assert_eq!(config.source_files.len(), 8);
        assert_eq!(config.source_files[0], "Ve.md");
        assert!(config.skip_headers.iter().any(|h| h == "notable locations"));
        assert!(config.skip_headers.iter().all(|h| h == &h.to_lowercase()));
    }
}
