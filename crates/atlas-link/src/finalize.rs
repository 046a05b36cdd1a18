//! Final location assembly.

use std::collections::{BTreeMap, HashMap, HashSet};

use atlas_core::entities::{AmbiguousReference, Location, PinnedData, WorkQueue};
use atlas_core::responses::FinalizeSummary;

use crate::ancestry::Ancestry;
use crate::error::LinkError;
use crate::mentions::MentionIndex;
use crate::policy::ResolverPolicy;
use crate::resolve::Resolver;

/// Everything the finalize stage writes or reports.
#[derive(Debug, Clone)]
pub struct FinalizeOutput {
    /// Sorted by zoom level, then name, then id.
    pub locations: Vec<Location>,
    /// In work-queue order of the source entry.
    pub ambiguous: Vec<AmbiguousReference>,
    pub summary: FinalizeSummary,
}

/// Turn pinned entries into locations with parents and cross-references.
///
/// `content` maps entry ids to full body text; entries without content are
/// never scanned for mentions. Pins whose id has no entry are dropped.
///
/// # Errors
///
/// Returns [`LinkError`] if the mention index cannot be built.
pub fn finalize(
    queue: &WorkQueue,
    pinned: &PinnedData,
    content: &HashMap<String, String>,
    policy: &ResolverPolicy,
) -> Result<FinalizeOutput, LinkError> {
    let ancestry = Ancestry::new(&queue.entries);
    let pinned_ids: HashSet<&str> = pinned
        .keys()
        .map(String::as_str)
        .filter(|id| ancestry.get(id).is_some())
        .collect();

    let index = MentionIndex::build(&queue.entries, &pinned_ids, policy)?;
    tracing::info!(
        names = index.len(),
        duplicates = index.duplicate_names(),
        "built pinned name index"
    );

    let resolver = Resolver::new(&ancestry, &index, policy);
    let mut related: HashMap<&str, Vec<String>> = HashMap::new();
    let mut ambiguous = Vec::new();
    let mut auto_resolved = 0;
    let mut content_matched = 0;

    for entry in &queue.entries {
        let Some(body) = content.get(&entry.id) else {
            continue;
        };
        content_matched += 1;
        if !pinned_ids.contains(entry.id.as_str()) {
            continue;
        }
        let links = resolver.scan(entry, body);
        auto_resolved += links.related_ids.len();
        ambiguous.extend(links.ambiguous);
        related.insert(entry.id.as_str(), links.related_ids);
    }

    let mut locations = Vec::with_capacity(pinned_ids.len());
    for (id, pin) in pinned {
        let Some(entry) = ancestry.get(id) else {
            tracing::warn!(%id, "pinned entry not found in work queue, skipping");
            continue;
        };
        locations.push(Location {
            id: entry.id.clone(),
            name: entry.name.clone(),
            location_type: pin.location_type,
            coordinates: pin.coordinates,
            zoom_level: pin.zoom_level,
            parent_id: ancestry
                .pinned_parent(&entry.id, &pinned_ids)
                .map(ToString::to_string),
            related_ids: related.remove(entry.id.as_str()).unwrap_or_default(),
            lore_file: entry.source_file.clone(),
            tags: entry.tags.clone(),
        });
    }
    locations.sort_by(|a, b| {
        a.zoom_level
            .cmp(&b.zoom_level)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    let summary = summarize(
        queue,
        pinned,
        &locations,
        Counts {
            duplicate_names: index.duplicate_names(),
            content_matched,
            auto_resolved,
            ambiguous: ambiguous.len(),
        },
    );

    Ok(FinalizeOutput {
        locations,
        ambiguous,
        summary,
    })
}

struct Counts {
    duplicate_names: usize,
    content_matched: usize,
    auto_resolved: usize,
    ambiguous: usize,
}

fn summarize(
    queue: &WorkQueue,
    pinned: &PinnedData,
    locations: &[Location],
    counts: Counts,
) -> FinalizeSummary {
    let mut by_zoom: BTreeMap<u8, usize> = BTreeMap::new();
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for location in locations {
        *by_zoom.entry(location.zoom_level).or_default() += 1;
        *by_type
            .entry(location.location_type.as_str().to_string())
            .or_default() += 1;
    }
    let mut by_type: Vec<(String, usize)> = by_type.into_iter().collect();
    by_type.sort_by(|a, b| b.1.cmp(&a.1));

    FinalizeSummary {
        entries_loaded: queue.entries.len(),
        pins_loaded: pinned.len(),
        duplicate_names: counts.duplicate_names,
        content_matched: counts.content_matched,
        auto_resolved: counts.auto_resolved,
        ambiguous: counts.ambiguous,
        locations: locations.len(),
        by_zoom: by_zoom.into_iter().collect(),
        by_type,
        with_parent: locations.iter().filter(|l| l.parent_id.is_some()).count(),
        with_related: locations.iter().filter(|l| !l.related_ids.is_empty()).count(),
        total_related: locations.iter().map(|l| l.related_ids.len()).sum(),
    }
}
