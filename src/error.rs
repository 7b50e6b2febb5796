//! Error types for the document splicing library.
//!
//! Only structural problems surface as [`Error`] values. Descriptor-level and
//! lookup-level issues (a bad row index, a missing anchor, an unknown job id)
//! are handled in-band as diagnostics on the operation's report so a batch
//! always completes. See the `inject` and `audit` modules for the diagnostic
//! types.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed document structure (generic)
    #[error("Malformed document structure: {0}")]
    MalformedStructure(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
