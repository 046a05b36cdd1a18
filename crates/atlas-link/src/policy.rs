//! Tuning knobs for mention resolution.

use std::collections::HashSet;

use atlas_config::ResolverConfig;

/// Heuristic thresholds applied by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Parent hops walked on each side when testing for shared ancestry.
    pub ancestry_depth: usize,
    /// Names with fewer characters are never treated as mentions.
    pub min_name_len: usize,
    /// Characters kept on each side of a mention in ambiguity snippets.
    pub snippet_radius: usize,
    /// Lowercase names never treated as mentions.
    pub skip_names: HashSet<String>,
}

impl ResolverPolicy {
    /// Whether an indexed (lowercase) name may be matched at all.
    #[must_use]
    pub fn accepts_name(&self, name: &str) -> bool {
        name.chars().count() >= self.min_name_len && !self.skip_names.contains(name)
    }
}

impl From<&ResolverConfig> for ResolverPolicy {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            ancestry_depth: config.ancestry_depth,
            min_name_len: config.min_name_len,
            snippet_radius: config.snippet_radius,
            skip_names: config
                .skip_names
                .iter()
                .map(|name| name.trim().to_lowercase())
                .collect(),
        }
    }
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}
