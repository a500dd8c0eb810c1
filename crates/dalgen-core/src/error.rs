use thiserror::Error;

/// Core error type for programming-contract violations.
///
/// Expected, data-driven problems are [`crate::ValidationFailure`] values;
/// this type is reserved for entities that passed validation yet still break
/// a structural invariant, which points at a broken builder upstream.
#[derive(Debug, Error)]
pub enum Error {
    /// A foreign-key attribute is missing its reference pair.
    #[error("foreign key attribute '{0}' has no reference pair")]
    BrokenReference(String),
    /// A sized attribute reached a backend without a size.
    #[error("attribute '{0}' requires a size but carries none")]
    MissingSize(String),
    /// The entity violates some other internal invariant.
    #[error("invalid entity: {0}")]
    InvalidEntity(String),
}

/// Convenience alias for results returned by dalgen crates.
pub type Result<T> = std::result::Result<T, Error>;
