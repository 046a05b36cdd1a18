//! Carry operator decisions over to a freshly parsed entry list.
//!
//! Status precedence, by entry id:
//! 1. present in the pinned store → `pinned`
//! 2. recorded `skipped` in the previous work queue → `skipped`
//! 3. otherwise → `pending`

use std::collections::HashSet;

use atlas_core::entities::{LoreEntry, PinnedData, WORK_QUEUE_VERSION, WorkQueue};
use atlas_core::enums::EntryStatus;
use chrono::{DateTime, Utc};

/// A rebuilt work queue plus the pins it could not place.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub queue: WorkQueue,
    /// Pinned ids with no parsed entry, in id order.
    pub orphaned_pins: Vec<String>,
}

/// Restore statuses on `entries` in place.
pub fn merge_statuses(entries: &mut [LoreEntry], pinned: &PinnedData, previous: Option<&WorkQueue>) {
    let skipped: HashSet<&str> = previous
        .map(|queue| {
            queue
                .entries
                .iter()
                .filter(|entry| entry.status == EntryStatus::Skipped)
                .map(|entry| entry.id.as_str())
                .collect()
        })
        .unwrap_or_default();

    for entry in entries {
        entry.status = if pinned.contains_key(&entry.id) {
            EntryStatus::Pinned
        } else if skipped.contains(entry.id.as_str()) {
            EntryStatus::Skipped
        } else {
            EntryStatus::Pending
        };
    }
}

/// Build the next work queue from freshly parsed entries.
#[must_use]
pub fn rebuild_work_queue(
    mut entries: Vec<LoreEntry>,
    source_files: Vec<String>,
    pinned: &PinnedData,
    previous: Option<&WorkQueue>,
    extracted_at: DateTime<Utc>,
) -> MergeOutcome {
    merge_statuses(&mut entries, pinned, previous);

    let known: HashSet<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
    let orphaned_pins: Vec<String> = pinned
        .keys()
        .filter(|id| !known.contains(id.as_str()))
        .cloned()
        .collect();
    for id in &orphaned_pins {
        tracing::warn!(%id, "pinned id has no parsed entry");
    }

    let mut queue = WorkQueue {
        version: WORK_QUEUE_VERSION,
        extracted_at,
        source_files,
        entries,
        current_index: 0,
    };
    queue.refresh_cursor();

    MergeOutcome {
        queue,
        orphaned_pins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::entities::PinnedLocation;
    use atlas_core::enums::LocationType;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn entry(id: &str, status: EntryStatus) -> LoreEntry {
        LoreEntry {
            id: id.to_string(),
            name: format!("Place {id}"),
            header_level: 3,
            header_text: format!("### Place {id}"),
            line_number: id.parse().unwrap(),
            source_file: "Ve.md".to_string(),
            tags: vec![],
            suggested_type: LocationType::City,
            suggested_zoom_level: 3,
            content_preview: String::new(),
            parent_entry_id: None,
            status,
        }
    }

    fn pin() -> PinnedLocation {
        PinnedLocation {
            coordinates: [1.0, 2.0],
            zoom_level: 3,
            location_type: LocationType::City,
            pinned_at: at(),
        }
    }

    fn statuses(queue: &WorkQueue) -> Vec<EntryStatus> {
        queue.entries.iter().map(|e| e.status).collect()
    }

    #[test]
    fn pinned_store_wins_over_previous_status() {
        let previous = WorkQueue {
            version: 1,
            extracted_at: at(),
            source_files: vec![],
            entries: vec![
                entry("1", EntryStatus::Skipped),
                entry("2", EntryStatus::Skipped),
                entry("3", EntryStatus::Pinned),
            ],
            current_index: 0,
        };
        let pinned = PinnedData::from([("1".to_string(), pin())]);
        let fresh = (1..=4)
            .map(|i| entry(&i.to_string(), EntryStatus::Pending))
            .collect();

        let outcome = rebuild_work_queue(fresh, vec!["Ve.md".into()], &pinned, Some(&previous), at());

        assert_eq!(
            statuses(&outcome.queue),
            vec![
                EntryStatus::Pinned,
                EntryStatus::Skipped,
                // Pinned previously but no longer in the store: the pin was undone.
                EntryStatus::Pending,
                EntryStatus::Pending,
            ]
        );
        assert_eq!(outcome.queue.current_index, 2);
        assert_eq!(outcome.queue.version, WORK_QUEUE_VERSION);
        assert!(outcome.orphaned_pins.is_empty());
    }

    #[test]
    fn first_run_leaves_everything_pending() {
        let fresh = vec![entry("1", EntryStatus::Pending), entry("2", EntryStatus::Pending)];
        let outcome = rebuild_work_queue(fresh, vec![], &PinnedData::new(), None, at());
        assert_eq!(outcome.queue.current_index, 0);
        assert_eq!(outcome.queue.stats().pending, 2);
    }

    #[test]
    fn cursor_defaults_to_zero_when_nothing_is_pending() {
        let pinned = PinnedData::from([("1".to_string(), pin()), ("2".to_string(), pin())]);
        let fresh = vec![entry("1", EntryStatus::Pending), entry("2", EntryStatus::Pending)];
        let outcome = rebuild_work_queue(fresh, vec![], &pinned, None, at());
        assert_eq!(outcome.queue.first_pending(), None);
        assert_eq!(outcome.queue.current_index, 0);
    }

    #[test]
    fn reports_pins_without_entries() {
        let pinned = PinnedData::from([("1".to_string(), pin()), ("99".to_string(), pin())]);
        let fresh = vec![entry("1", EntryStatus::Pending)];
        let outcome = rebuild_work_queue(fresh, vec![], &pinned, None, at());
        assert_eq!(outcome.orphaned_pins, vec!["99".to_string()]);
    }

    #[test]
    fn fresh_parser_status_is_ignored() {
        // A stale status on a freshly built entry never survives the merge.
        let mut entries = vec![entry("5", EntryStatus::Skipped)];
        merge_statuses(&mut entries, &PinnedData::new(), None);
        assert_eq!(entries[0].status, EntryStatus::Pending);
    }
}
