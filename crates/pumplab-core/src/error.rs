//! Error taxonomy shared by every pumplab crate.
//!
//! Uses `thiserror` for structured, matchable variants. Every failure is
//! recoverable and scoped to a single requested computation; nothing here is
//! process-fatal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by pumplab operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum PumpError {
    /// The language id is not registered in the catalog.
    #[error("language not found: '{id}'")]
    NotFound { id: String },

    /// A negative pump count was requested.
    #[error("invalid pump count {count}: pump counts must be non-negative")]
    InvalidPumpCount { count: i64 },

    /// Pumping `count` times would produce a string longer than `max` bytes.
    #[error("pump count {count} is too large: the pumped string would exceed {max} bytes")]
    PumpedTooLong { count: i64, max: usize },

    /// The concatenated segments do not reconstruct the source string.
    #[error("decomposition mismatch: segments concatenate to '{actual}', expected '{expected}'")]
    DecompositionMismatch { expected: String, actual: String },

    /// The language's membership predicate failed on an input.
    #[error("recognizer for '{language}' failed: {message}")]
    RecognizerError { language: String, message: String },

    /// No sample-generation rule exists for the language.
    #[error("no generation rule for language '{language}' (requested length {length})")]
    UnsupportedGeneration { language: String, length: usize },
}

impl PumpError {
    /// Whether this error means a recognizer could not classify an input.
    pub fn is_recognizer_error(&self) -> bool {
        matches!(self, PumpError::RecognizerError { .. })
    }
}
