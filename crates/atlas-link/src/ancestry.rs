//! Structural ancestry over the parsed entry forest.
//!
//! Ancestry always follows `parent_entry_id`, whether or not the ancestors
//! are pinned. Only [`Ancestry::pinned_parent`] looks at the pinned set.

use std::collections::{HashMap, HashSet};

use atlas_core::entities::LoreEntry;

/// Id-indexed view of the work queue entries.
#[derive(Debug)]
pub struct Ancestry<'a> {
    by_id: HashMap<&'a str, &'a LoreEntry>,
}

impl<'a> Ancestry<'a> {
    #[must_use]
    pub fn new(entries: &'a [LoreEntry]) -> Self {
        Self {
            by_id: entries.iter().map(|e| (e.id.as_str(), e)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a LoreEntry> {
        self.by_id.get(id).copied()
    }

    fn parent_of(&self, id: &str) -> Option<&'a str> {
        self.get(id)?.parent_entry_id.as_deref()
    }

    /// Up to `depth` ancestor ids, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: &str, depth: usize) -> Vec<&'a str> {
        let mut chain = Vec::with_capacity(depth);
        let mut current = self.get(id);
        while chain.len() < depth {
            let Some(parent) = current.and_then(|e| e.parent_entry_id.as_deref()) else {
                break;
            };
            chain.push(parent);
            current = self.get(parent);
        }
        chain
    }

    /// One is an ancestor of the other, or both share an ancestor, within
    /// `depth` hops on each side.
    #[must_use]
    pub fn share_ancestor(&self, a: &str, b: &str, depth: usize) -> bool {
        let ancestors_a: HashSet<&str> = self.ancestors(a, depth).into_iter().collect();
        let ancestors_b = self.ancestors(b, depth);

        ancestors_a.contains(b)
            || ancestors_b.iter().any(|id| *id == a)
            || ancestors_b.iter().any(|id| ancestors_a.contains(id))
    }

    /// `a` is the immediate parent or immediate child of `b`.
    #[must_use]
    pub fn is_direct_relation(&self, a: &str, b: &str) -> bool {
        self.parent_of(a) == Some(b) || self.parent_of(b) == Some(a)
    }

    /// Nearest ancestor present in `pinned`, skipping unpinned levels.
    #[must_use]
    pub fn pinned_parent(&self, id: &str, pinned: &HashSet<&str>) -> Option<&'a str> {
        let mut current = id;
        // Bounded by the entry count so a malformed queue cannot loop forever.
        for _ in 0..self.by_id.len() {
            let parent = self.parent_of(current)?;
            if pinned.contains(parent) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }
}
