//! Resolver error types for atlas-link.

/// Errors raised while building a resolver.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// A pinned name could not be turned into a mention pattern.
    #[error("Invalid mention pattern for {name:?}: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}
