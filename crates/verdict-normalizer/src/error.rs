//! Error types for the Normalizer

use thiserror::Error;

/// Errors that can occur while normalizing a payload
///
/// These never cross [`crate::Normalizer::normalize`]; they are logged and
/// folded into the canonical error record by the assembler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizerError {
    /// Payload carries no usable content
    #[error("Empty payload")]
    EmptyPayload,

    /// Payload exceeds the configured maximum size
    #[error("Payload too large: {0} chars (max: {1})")]
    PayloadTooLarge(usize, usize),

    /// Strategy preconditions do not hold for this payload
    #[error("Strategy not applicable: {0}")]
    NotApplicable(String),

    /// Nested payload has an unexpected shape
    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for NormalizerError {
    fn from(e: serde_json::Error) -> Self {
        NormalizerError::JsonParse(e.to_string())
    }
}
