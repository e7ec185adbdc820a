//! Error types for the generation engine

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors that abort generation.
///
/// Problems local to a single field (an unmapped stub type) are not errors:
/// they are recorded as [`Warning`](crate::Warning)s and the field is dropped.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The identity field's source type cannot be cast to the configured identity type
    #[error("no cast from {from} to {to} for identity field '{field}' of {class}")]
    UnmappedCast {
        class: String,
        field: String,
        from: String,
        to: String,
    },

    /// A class reference that the class set cannot resolve
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// Malformed class model input
    #[error("invalid class model: {0}")]
    InvalidModel(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading input or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Returns a stable numeric code; the CLI derives its exit status from it
    pub fn error_code(&self) -> u32 {
        match self {
            GenerationError::UnmappedCast { .. } => 1,
            GenerationError::UnknownClass(_) => 2,
            GenerationError::InvalidModel(_) => 3,
            GenerationError::Config(_) => 4,
            GenerationError::Json(_) => 5,
            GenerationError::Io(_) => 6,
        }
    }
}
