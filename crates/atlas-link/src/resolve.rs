//! Mention resolution for a single pinned source entry.
//!
//! For each indexed name found in the source's body:
//!
//! ```text
//! other candidates      0 → ignore (only the source itself has the name)
//!                       1 → link
//!                      2+ → narrow to candidates sharing ancestry
//!   survivors           1 → link
//!                       0 → ambiguous over all other candidates
//!                      2+ → exactly one direct parent/child → link
//!                           otherwise ambiguous over the survivors
//! ```

use atlas_core::entities::{AmbiguousReference, LoreEntry};

use crate::ancestry::Ancestry;
use crate::mentions::{IndexedName, MentionIndex, snippet};
use crate::policy::ResolverPolicy;

/// What one mention resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Linked(String),
    Ambiguous(Vec<String>),
}

/// Links and open questions found in one source entry's body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLinks {
    /// Resolved target ids, in name-index order, without duplicates.
    pub related_ids: Vec<String>,
    pub ambiguous: Vec<AmbiguousReference>,
}

/// Resolves mentions against a fixed pinned name index.
#[derive(Debug)]
pub struct Resolver<'a> {
    ancestry: &'a Ancestry<'a>,
    index: &'a MentionIndex,
    policy: &'a ResolverPolicy,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(
        ancestry: &'a Ancestry<'a>,
        index: &'a MentionIndex,
        policy: &'a ResolverPolicy,
    ) -> Self {
        Self {
            ancestry,
            index,
            policy,
        }
    }

    /// Decide what a mention of `name` inside `source_id` refers to, or
    /// `None` when the only bearer of the name is the source itself.
    #[must_use]
    pub fn resolve(&self, source_id: &str, name: &IndexedName) -> Option<Resolution> {
        let others: Vec<&str> = name
            .ids
            .iter()
            .map(String::as_str)
            .filter(|id| *id != source_id)
            .collect();

        match others.as_slice() {
            [] => return None,
            [only] => return Some(Resolution::Linked((*only).to_string())),
            _ => {}
        }

        let depth = self.policy.ancestry_depth;
        let survivors: Vec<&str> = others
            .iter()
            .copied()
            .filter(|id| self.ancestry.share_ancestor(source_id, id, depth))
            .collect();

        let resolution = match survivors.as_slice() {
            [only] => Resolution::Linked((*only).to_string()),
            [] => Resolution::Ambiguous(to_owned(&others)),
            _ => {
                let direct: Vec<&str> = survivors
                    .iter()
                    .copied()
                    .filter(|id| self.ancestry.is_direct_relation(source_id, id))
                    .collect();
                match direct.as_slice() {
                    [only] => Resolution::Linked((*only).to_string()),
                    _ => Resolution::Ambiguous(to_owned(&survivors)),
                }
            }
        };
        Some(resolution)
    }

    /// Scan one source entry's full body for mentions.
    #[must_use]
    pub fn scan(&self, source: &LoreEntry, content: &str) -> SourceLinks {
        let mut links = SourceLinks::default();

        for name in self.index.iter() {
            let Some(range) = name.find_in(content) else {
                continue;
            };
            match self.resolve(&source.id, name) {
                None => {}
                Some(Resolution::Linked(id)) => {
                    tracing::trace!(source = %source.id, target = %id, name = %name.key, "linked mention");
                    if !links.related_ids.contains(&id) {
                        links.related_ids.push(id);
                    }
                }
                Some(Resolution::Ambiguous(candidate_ids)) => {
                    tracing::debug!(
                        source = %source.id,
                        name = %name.key,
                        candidates = candidate_ids.len(),
                        "ambiguous mention"
                    );
                    links.ambiguous.push(self.report(
                        source,
                        name,
                        candidate_ids,
                        snippet(content, range, self.policy.snippet_radius),
                    ));
                }
            }
        }
        links
    }

    fn report(
        &self,
        source: &LoreEntry,
        name: &IndexedName,
        candidate_ids: Vec<String>,
        context: String,
    ) -> AmbiguousReference {
        let candidate_names = candidate_ids
            .iter()
            .map(|id| {
                self.ancestry
                    .get(id)
                    .map_or_else(|| id.clone(), LoreEntry::display_label)
            })
            .collect();
        AmbiguousReference {
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            mentioned_name: name.key.clone(),
            candidate_ids,
            candidate_names,
            context,
        }
    }
}

fn to_owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}
