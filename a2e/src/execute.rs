//! Endpoint execution types.
//!
//! Execution is `POST /api/v1/open/services/{service_id}/execute/{endpoint}`.
//! The service identity and endpoint name travel in the path; the body
//! carries only the consumer token and the input map (see [`ExecuteBody`]).
//!
//! A successful envelope does not mean a successful execution: the service
//! may report a business-level failure in [`ExecuteResult::error`] while the
//! envelope code is still `0`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dynamic string-keyed JSON object, used for endpoint input/output and
/// JSON-schema fragments whose shape is only known at runtime.
pub type JsonMap = serde_json::Map<String, Value>;

/// Execution input.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ExecuteRequest {
    /// Target service identity.
    pub service_id: String,
    /// Endpoint name as advertised by the service's protocol document.
    pub endpoint: String,
    /// Consumer token from a previous token request.
    pub consumer_token: String,
    /// Endpoint input, shaped by the endpoint's `input_schema`.
    pub input: JsonMap,
}

impl ExecuteRequest {
    /// Creates a request with empty input.
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        endpoint: impl Into<String>,
        consumer_token: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            endpoint: endpoint.into(),
            consumer_token: consumer_token.into(),
            input: JsonMap::new(),
        }
    }

    /// Sets a single input field, replacing any previous value for `key`.
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole input map.
    #[must_use]
    pub fn with_input_map(mut self, input: JsonMap) -> Self {
        self.input = input;
        self
    }

    /// Returns the wire body for this request.
    #[must_use]
    pub fn body(&self) -> ExecuteBody<'_> {
        ExecuteBody {
            consumer_token: &self.consumer_token,
            input: &self.input,
        }
    }
}

impl std::fmt::Debug for ExecuteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecuteRequest")
            .field("service_id", &self.service_id)
            .field("endpoint", &self.endpoint)
            .field("consumer_token", &"<redacted>")
            .field("input", &self.input)
            .finish()
    }
}

/// Wire body of an execute call: exactly `consumer_token` and `input`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExecuteBody<'a> {
    /// Consumer token.
    pub consumer_token: &'a str,
    /// Endpoint input.
    pub input: &'a JsonMap,
}

/// Execution output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteResult {
    /// Identity of this execution.
    pub execution_id: String,
    /// Execution status reported by the service.
    pub status: String,
    /// Endpoint output, shaped by the endpoint's `output_schema`.
    pub output: JsonMap,
    /// Business-level failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecuteError>,
}

impl ExecuteResult {
    /// Returns `true` if the service reported a business-level failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Folds a business-level failure into an `Err`.
    ///
    /// # Errors
    ///
    /// Returns the [`ExecuteError`] if one was reported.
    pub fn into_result(self) -> Result<Self, ExecuteError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Business-level execution failure carried inside a successful envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, thiserror::Error)]
#[serde(default)]
#[error("execution error {code}: {message}")]
pub struct ExecuteError {
    /// Service-defined error code (see the protocol document's error codes).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Remediation advice.
    pub suggestion: String,
}

impl ExecuteError {
    /// Creates an execution error without a suggestion.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: String::new(),
        }
    }

    /// Sets the remediation advice.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }
}
