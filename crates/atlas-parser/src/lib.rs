//! # atlas-parser
//!
//! Markdown lore parsing for Atlas.
//!
//! - [`structure`]: one streaming pass per document producing [`LoreEntry`]
//!   values with parent links, skipping structural section headers
//! - [`classify`]: tag, content-pattern, and header-level heuristics for a
//!   suggested location type and zoom level
//! - [`sections`]: an independent header-bounded split used to recover each
//!   entry's full body text by line number
//!
//! [`LoreEntry`]: atlas_core::entities::LoreEntry

pub mod classify;
pub mod document;
pub mod error;
pub mod sections;
pub mod structure;

pub use classify::{suggest_type, suggest_zoom};
pub use document::SourceDocument;
pub use error::ParserError;
pub use sections::{Section, associate_content, split_sections};
pub use structure::ParseSession;
