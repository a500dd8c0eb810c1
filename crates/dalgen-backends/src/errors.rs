use thiserror::Error;

/// Errors emitted by the generation engine and templates.
///
/// Expected validation and advisory conditions never appear here; they are
/// carried as [`crate::GenerationOutcome`] values. This type covers contract
/// violations and report I/O only.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Contract(#[from] dalgen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
