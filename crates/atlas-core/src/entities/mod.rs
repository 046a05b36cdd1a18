//! Entity structs persisted by the Atlas pipeline.
//!
//! Persisted documents use camelCase field names so the JSON stores stay
//! interchangeable with the curation web interface.

mod entry;
mod location;
mod pin;
mod queue;

pub use entry::LoreEntry;
pub use location::{AmbiguousReference, Location};
pub use pin::{Coordinates, PinnedData, PinnedLocation};
pub use queue::{QueueStats, WORK_QUEUE_VERSION, WorkQueue};
