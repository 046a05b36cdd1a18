//! Parser error types for atlas-parser.

/// Errors that can occur while parsing or classifying lore documents.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// A markdown header level outside 1–6 reached the zoom classifier.
    #[error("Invalid header level: {0}. Expected 1-6.")]
    InvalidHeaderLevel(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
