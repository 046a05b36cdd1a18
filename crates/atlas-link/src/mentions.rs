//! Name index over pinned entries and whole-word mention matching.

use std::collections::{BTreeMap, HashSet};

use atlas_core::entities::LoreEntry;
use regex::Regex;

use crate::error::LinkError;
use crate::policy::ResolverPolicy;

/// One matchable name and every pinned entry that carries it.
#[derive(Debug, Clone)]
pub struct IndexedName {
    /// Lowercased entry name.
    pub key: String,
    /// Pinned entry ids with this name, in work-queue order.
    pub ids: Vec<String>,
    pattern: Regex,
}

impl IndexedName {
    fn new(key: String, ids: Vec<String>) -> Result<Self, LinkError> {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&key)))
            .map_err(|source| LinkError::Pattern {
                name: key.clone(),
                source,
            })?;
        Ok(Self { key, ids, pattern })
    }

    /// Byte range of the first whole-word, case-insensitive mention.
    #[must_use]
    pub fn find_in(&self, content: &str) -> Option<(usize, usize)> {
        self.pattern.find(content).map(|m| (m.start(), m.end()))
    }
}

/// Matchable names, longest first.
#[derive(Debug, Clone, Default)]
pub struct MentionIndex {
    names: Vec<IndexedName>,
    duplicate_names: usize,
}

impl MentionIndex {
    /// Index the names of `entries` whose ids are in `pinned`.
    ///
    /// Names the policy rejects (too short, denylisted) are counted for
    /// duplicates but never matched.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Pattern`] if a name cannot be compiled.
    pub fn build(
        entries: &[LoreEntry],
        pinned: &HashSet<&str>,
        policy: &ResolverPolicy,
    ) -> Result<Self, LinkError> {
        let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in entries.iter().filter(|e| pinned.contains(e.id.as_str())) {
            by_name
                .entry(entry.name.to_lowercase())
                .or_default()
                .push(entry.id.clone());
        }

        let duplicate_names = by_name.values().filter(|ids| ids.len() > 1).count();

        let mut names = by_name
            .into_iter()
            .filter(|(key, _)| policy.accepts_name(key))
            .map(|(key, ids)| IndexedName::new(key, ids))
            .collect::<Result<Vec<_>, _>>()?;
        // Longest first; BTreeMap order already breaks ties lexicographically
        // and the sort is stable.
        names.sort_by_key(|name| std::cmp::Reverse(name.key.chars().count()));

        Ok(Self {
            names,
            duplicate_names,
        })
    }

    /// Names shared by more than one pinned entry.
    #[must_use]
    pub const fn duplicate_names(&self) -> usize {
        self.duplicate_names
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedName> {
        self.names.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Up to `radius` characters either side of `start..end`, kept within the
/// mention's line and trimmed.
#[must_use]
pub fn snippet(content: &str, (start, end): (usize, usize), radius: usize) -> String {
    let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[end..].find('\n').map_or(content.len(), |i| end + i);

    let before = &content[line_start..start];
    let skip = before.chars().count().saturating_sub(radius);
    let before: String = before.chars().skip(skip).collect();
    let after: String = content[end..line_end].chars().take(radius).collect();

    format!("{before}{}{after}", &content[start..end])
        .trim()
        .to_string()
}
