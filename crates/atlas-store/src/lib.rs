//! # atlas-store
//!
//! Persistence and curation state for Atlas.
//!
//! The work queue, pinned store, and finalize outputs are plain JSON
//! documents in the data directory, read and written whole. This crate owns
//! those documents ([`DataStore`]), the single-writer lock around them
//! ([`lock`]), the status merge that preserves operator decisions across
//! re-extraction ([`merge`]), and the curation operations ([`curation`]).

pub mod curation;
pub mod error;
pub mod lock;
pub mod merge;
pub mod store;

pub use curation::PinRequest;
pub use error::StoreError;
pub use merge::{MergeOutcome, rebuild_work_queue};
pub use store::DataStore;
