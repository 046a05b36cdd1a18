//! Cross-reference resolver policy.
//!
//! The ancestry bound and the short-name denylist are tuning knobs, not laws;
//! changing them changes which mentions auto-link.

use serde::{Deserialize, Serialize};

/// Common words that coincide with place names and must not count as mentions.
pub const DEFAULT_SKIP_NAMES: &[&str] = &[
    "the", "and", "for", "but", "bay", "sea", "lake", "hill", "port", "fort", "east", "west",
    "north", "south", "old", "new", "great", "little", "upper", "lower",
];

const fn default_ancestry_depth() -> usize {
    3
}

const fn default_min_name_len() -> usize {
    4
}

const fn default_snippet_radius() -> usize {
    50
}

fn default_skip_names() -> Vec<String> {
    DEFAULT_SKIP_NAMES.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Parent hops walked when looking for shared ancestry.
    #[serde(default = "default_ancestry_depth")]
    pub ancestry_depth: usize,

    /// Names shorter than this (in characters) are never matched.
    #[serde(default = "default_min_name_len")]
    pub min_name_len: usize,

    /// Characters of context kept on each side of an ambiguous mention.
    #[serde(default = "default_snippet_radius")]
    pub snippet_radius: usize,

    /// Lowercase names never treated as mentions.
    #[serde(default = "default_skip_names")]
    pub skip_names: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ancestry_depth: default_ancestry_depth(),
            min_name_len: default_min_name_len(),
            snippet_radius: default_snippet_radius(),
            skip_names: default_skip_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ResolverConfig::default();
        assert_eq!(config.ancestry_depth, 3);
        assert_eq!(config.min_name_len, 4);
        assert_eq!(config.snippet_radius, 50);
        assert_eq!(config.skip_names.len(), 20);
        assert!(config.skip_names.iter().any(|n| n == "north"));
    }
}
