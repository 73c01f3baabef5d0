//! Error types for the A2E HTTP client.
//!
//! Failures fall into two layers:
//!
//! - local failures (URL construction, transport, timeout, malformed JSON
//!   at the envelope or payload level) are reported by every variant except
//!   [`ClientError::Api`];
//! - application failures (envelope `code` is non-zero) are reported as
//!   [`ClientError::Api`].
//!
//! Business-level execution failures are never a [`ClientError`]; they are
//! returned inside a successful [`a2e::ExecuteResult`].

use a2e::ApiError;
use http::StatusCode;
use http::header::InvalidHeaderValue;

/// Errors that can occur while calling the A2E service.
///
/// Each local variant carries a static `context` naming the route, such as
/// `"POST /services/search"`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The base URL could not be parsed.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("Base URL cannot carry a path: {context}: {base_url}")]
    CannotBeABase {
        /// Human-readable context.
        context: &'static str,
        /// The offending base URL.
        base_url: String,
    },
    /// A value interpolated into the path was empty.
    #[error("Empty path segment: {context}: `{field}` must not be empty")]
    EmptyPathSegment {
        /// Human-readable context.
        context: &'static str,
        /// Name of the empty request field.
        field: &'static str,
    },
    /// A configured value is not a valid HTTP header value.
    #[error("Invalid header value for {header}: {context}: {source}")]
    InvalidHeader {
        /// Human-readable context.
        context: &'static str,
        /// Header name.
        header: &'static str,
        /// The underlying header error.
        #[source]
        source: InvalidHeaderValue,
    },
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Failed to read the response body.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The response body is not a valid envelope.
    #[error("Failed to decode response envelope (HTTP {status}): {context}: {source}")]
    EnvelopeDecode {
        /// Human-readable context.
        context: &'static str,
        /// HTTP status of the response.
        status: StatusCode,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The envelope payload does not match the expected result type.
    #[error("Failed to decode response payload: {context}: {source}")]
    PayloadDecode {
        /// Human-readable context.
        context: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The envelope reported a non-zero code.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    /// Returns `true` if the service answered with a non-zero envelope code.
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns the [`ApiError`] if this is an application-level failure.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http { source, .. } | Self::ResponseBodyRead { source, .. } => {
                source.is_timeout()
            }
            _ => false,
        }
    }

    /// Returns `true` if the response could not be decoded as JSON, at
    /// either the envelope or the payload level.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::EnvelopeDecode { .. } | Self::PayloadDecode { .. }
        )
    }
}
