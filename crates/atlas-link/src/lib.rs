//! # atlas-link
//!
//! Cross-reference resolution for Atlas.
//!
//! Given the work queue, the pinned store, and each entry's full body text,
//! [`finalize`] produces the final [`Location`] list: every pin becomes a
//! location whose `parent_id` is its nearest pinned ancestor and whose
//! `related_ids` are the pinned entries its body mentions by name. Mentions
//! that ancestry cannot pin down to one target are reported as
//! [`AmbiguousReference`] records instead of being guessed.
//!
//! [`Location`]: atlas_core::entities::Location
//! [`AmbiguousReference`]: atlas_core::entities::AmbiguousReference

pub mod ancestry;
pub mod error;
pub mod finalize;
pub mod mentions;
pub mod policy;
pub mod resolve;

pub use error::LinkError;
pub use finalize::{FinalizeOutput, finalize};
pub use policy::ResolverPolicy;
pub use resolve::{Resolution, Resolver};
