//! Operator curation over the work queue and pinned store.
//!
//! These functions mutate in-memory documents only. Callers load both stores,
//! hold the write lock, apply one operation, and save both stores back.

use atlas_core::entities::{Coordinates, PinnedData, PinnedLocation, WorkQueue};
use atlas_core::enums::{EntryStatus, LocationType};
use atlas_core::errors::CoreError;
use atlas_core::responses::CursorResponse;
use chrono::{DateTime, Utc};

/// Zoom levels a pin may carry.
pub const PIN_ZOOM_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Operator-supplied placement for [`pin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinRequest {
    pub coordinates: Coordinates,
    pub zoom_level: u8,
    pub location_type: LocationType,
}

/// The entry under the review cursor, its index, and overall stats.
#[must_use]
pub fn cursor(queue: &WorkQueue) -> CursorResponse {
    let current_index = queue.cursor_position();
    CursorResponse {
        current_entry: current_index.map(|i| queue.entries[i].clone()),
        current_index,
        stats: queue.stats(),
    }
}

/// Pin an entry, replacing any earlier pin for it.
///
/// # Errors
///
/// - [`CoreError::Validation`] when the zoom is outside 1–5 or a coordinate
///   is not finite
/// - [`CoreError::NotFound`] for an unknown id
/// - [`CoreError::InvalidTransition`] when the entry cannot become pinned
pub fn pin(
    queue: &mut WorkQueue,
    pinned: &mut PinnedData,
    id: &str,
    request: PinRequest,
    now: DateTime<Utc>,
) -> Result<CursorResponse, CoreError> {
    if !PIN_ZOOM_RANGE.contains(&request.zoom_level) {
        return Err(CoreError::Validation(format!(
            "zoom level {} is outside 1-5",
            request.zoom_level
        )));
    }
    if request.coordinates.iter().any(|c| !c.is_finite()) {
        return Err(CoreError::Validation(
            "coordinates must be finite numbers".to_string(),
        ));
    }

    transition(queue, id, EntryStatus::Pinned)?;
    pinned.insert(
        id.to_string(),
        PinnedLocation {
            coordinates: request.coordinates,
            zoom_level: request.zoom_level,
            location_type: request.location_type,
            pinned_at: now,
        },
    );
    tracing::info!(%id, zoom = request.zoom_level, location_type = %request.location_type, "pinned entry");

    queue.refresh_cursor();
    Ok(cursor(queue))
}

/// Mark an entry as not a map location.
///
/// # Errors
///
/// [`CoreError::NotFound`] for an unknown id; [`CoreError::InvalidTransition`]
/// when the entry is pinned or already skipped.
pub fn skip(queue: &mut WorkQueue, id: &str) -> Result<CursorResponse, CoreError> {
    transition(queue, id, EntryStatus::Skipped)?;
    tracing::info!(%id, "skipped entry");

    queue.refresh_cursor();
    Ok(cursor(queue))
}

/// Move the cursor to the first pending entry of `source_file`.
///
/// # Errors
///
/// [`CoreError::NotFound`] when that file has no pending entry.
pub fn jump_to_file(queue: &mut WorkQueue, source_file: &str) -> Result<CursorResponse, CoreError> {
    let index = queue
        .entries
        .iter()
        .position(|e| e.source_file == source_file && e.status == EntryStatus::Pending)
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "pending entry in".to_string(),
            id: source_file.to_string(),
        })?;

    queue.current_index = index;
    Ok(CursorResponse {
        current_entry: Some(queue.entries[index].clone()),
        current_index: Some(index),
        stats: queue.stats(),
    })
}

/// Undo the nearest decision before `from` (default: the cursor, which a jump
/// may have moved, or the end
/// of the queue when nothing is pending). The reverted entry becomes pending,
/// loses its pin, and becomes the cursor.
///
/// # Errors
///
/// [`CoreError::NotFound`] when no pinned or skipped entry precedes `from`.
pub fn back(
    queue: &mut WorkQueue,
    pinned: &mut PinnedData,
    from: Option<usize>,
) -> Result<CursorResponse, CoreError> {
    let from = from
        .or_else(|| queue.cursor_position())
        .unwrap_or(queue.entries.len())
        .min(queue.entries.len());

    let index = queue.entries[..from]
        .iter()
        .rposition(|e| e.status.is_decided())
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "decided entry before index".to_string(),
            id: from.to_string(),
        })?;

    let entry = &mut queue.entries[index];
    let previous = entry.status;
    entry.status = EntryStatus::Pending;
    if pinned.remove(&entry.id).is_some() {
        tracing::info!(id = %entry.id, "removed pin");
    }
    tracing::info!(id = %entry.id, from = %previous, "reverted entry to pending");

    queue.current_index = index;
    Ok(CursorResponse {
        current_entry: Some(queue.entries[index].clone()),
        current_index: Some(index),
        stats: queue.stats(),
    })
}

fn transition(queue: &mut WorkQueue, id: &str, next: EntryStatus) -> Result<(), CoreError> {
    let entry = queue
        .entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| CoreError::entry_not_found(id))?;

    if !entry.status.can_transition_to(next) {
        return Err(CoreError::InvalidTransition {
            entity_type: "entry".to_string(),
            id: id.to_string(),
            from: entry.status.to_string(),
            to: next.to_string(),
        });
    }
    entry.status = next;
    Ok(())
}
