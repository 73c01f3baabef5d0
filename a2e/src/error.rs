//! Application-level error reported by the A2E service.

use serde::{Deserialize, Serialize};

/// Error returned when a response envelope carries a non-zero `code`.
///
/// The numeric envelope code is kept in its decimal string form so callers
/// can compare it directly against the codes listed in a protocol
/// document's error-handling section. Any payload sent alongside a failing
/// envelope is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("API error {code}: {message}")]
pub struct ApiError {
    /// Envelope code, stringified (e.g. `"404"`).
    pub code: String,
    /// Human-readable message from the envelope.
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Builds the error from a raw envelope code and message.
    #[must_use]
    pub fn from_envelope(code: i64, message: impl Into<String>) -> Self {
        Self::new(code.to_string(), message)
    }

    /// Returns the envelope code parsed back into an integer.
    ///
    /// Returns `None` if the code was not produced from a numeric envelope
    /// (for example when constructed by hand with a symbolic code).
    #[must_use]
    pub fn numeric_code(&self) -> Option<i64> {
        self.code.parse().ok()
    }

    /// Returns `true` if this error carries the given envelope code.
    #[must_use]
    pub fn has_code(&self, code: i64) -> bool {
        self.numeric_code() == Some(code)
    }
}
