//! An HTTP client for a _remote_ A2E platform.
//!
//! [`ProtocolClient`] covers the four open-platform operations: catalog
//! search, protocol document retrieval, consumer token acquisition, and
//! endpoint execution.
//!
//! ## Features
//!
//! - Uses `reqwest` for async HTTP requests; a pre-configured client can be
//!   injected through [`ClientConfig::with_http_client`]
//! - One request per call: no retries, no caching, no background tasks
//! - Integrates with `tracing` if the `telemetry` feature is enabled
//!
//! ## Error Handling
//!
//! Every response is decoded as an [`Envelope`] first. A body that is not an
//! envelope, or a payload that does not fit the expected result, is a local
//! decoding error. A non-zero envelope code becomes [`ClientError::Api`]
//! and any payload is ignored. The HTTP status line is not consulted; the
//! envelope code is authoritative.
//!
//! For [`ProtocolClient::execute`], a successful call may still carry a
//! business-level failure in [`ExecuteResult::error`].

use std::fmt::Display;
use std::time::Duration;

use a2e::{
    AuthRequest, AuthResult, Envelope, EnvelopeError, ExecuteRequest, ExecuteResult,
    ProtocolDocument, SearchRequest, SearchResult,
};
use http::{HeaderValue, StatusCode};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::{ClientConfig, ConfigError};
use crate::constants::APP_ID_HEADER;
use crate::error::ClientError;
use crate::route::Route;

/// A client for the A2E open platform.
///
/// Holds only immutable configuration and a reqwest connection pool, so a
/// single instance (or its clones) can be shared across tasks.
#[derive(Clone, Debug)]
pub struct ProtocolClient {
    /// Configuration with a normalised base URL. `http_client` is always
    /// `None` here; the client lives in `client`.
    config: ClientConfig,
    /// Shared reqwest HTTP client
    client: Client,
}

impl Default for ProtocolClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl From<ClientConfig> for ProtocolClient {
    fn from(config: ClientConfig) -> Self {
        Self::new(config)
    }
}

impl ProtocolClient {
    /// Creates a client from the given configuration.
    ///
    /// Performs no I/O and no validation; an unusable base URL is reported
    /// by the first request.
    #[must_use]
    pub fn new(mut config: ClientConfig) -> Self {
        let client = config.http_client.take().unwrap_or_default();
        config.base_url = config.normalized_base_url().to_owned();
        Self { config, client }
    }

    /// Creates a client configured from `A2E_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        ClientConfig::from_env().map(Self::new)
    }

    /// Returns the effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Searches the service catalog.
    ///
    /// Sends `POST /api/v1/open/services/search`. The order of
    /// [`SearchResult::list`] is the server's.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the envelope code is non-zero, or
    /// another [`ClientError`] on transport or decoding failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.client.search_services",
            skip_all,
            fields(
                keyword = %request.keyword,
                timeout = ?self.config.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn search_services(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResult, ClientError> {
        self.call(Route::Search, Some(request)).await
    }

    /// Fetches the protocol document of a service.
    ///
    /// Sends `GET /api/v1/open/services/{service_id}/protocol`. Callers are
    /// expected to cache the document themselves.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyPathSegment`] if `service_id` is empty,
    /// [`ClientError::Api`] if the envelope code is non-zero, or another
    /// [`ClientError`] on transport or decoding failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.client.get_protocol",
            skip_all,
            fields(
                service_id = %service_id,
                timeout = ?self.config.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn get_protocol(&self, service_id: &str) -> Result<ProtocolDocument, ClientError> {
        self.call::<(), _>(Route::Protocol { service_id }, None)
            .await
    }

    /// Exchanges an authorization code for a consumer token.
    ///
    /// Sends `POST /api/v1/open/platform/get_user_token` with the request as
    /// the body. The token is not stored; pass it to [`Self::execute`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the envelope code is non-zero, or
    /// another [`ClientError`] on transport or decoding failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.client.get_consumer_token",
            skip_all,
            fields(
                auth_type = %request.auth_type,
                timeout = ?self.config.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn get_consumer_token(
        &self,
        request: &AuthRequest,
    ) -> Result<AuthResult, ClientError> {
        self.call(Route::ConsumerToken, Some(request)).await
    }

    /// Executes a service endpoint.
    ///
    /// Sends `POST /api/v1/open/services/{service_id}/execute/{endpoint}`
    /// with a body of exactly `consumer_token` and `input`. The endpoint
    /// name is not checked against the protocol document.
    ///
    /// An `Ok` result only means the platform accepted the call; inspect
    /// [`ExecuteResult::error`] (or use [`ExecuteResult::into_result`]) for
    /// business-level failures.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyPathSegment`] if the service ID or
    /// endpoint name is empty, [`ClientError::Api`] if the envelope code is
    /// non-zero, or another [`ClientError`] on transport or decoding
    /// failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.client.execute",
            skip_all,
            fields(
                service_id = %request.service_id,
                endpoint = %request.endpoint,
                timeout = ?self.config.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ClientError> {
        let route = Route::Execute {
            service_id: &request.service_id,
            endpoint: &request.endpoint,
        };
        let result = self.call(route, Some(&request.body())).await;
        record_execution_failure(&result);
        result
    }

    /// Performs one round trip and records the outcome on the current span.
    async fn call<B, R>(&self, route: Route<'_>, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Default,
    {
        let result = self.round_trip(route, body).await;
        record_result_on_span(&result);
        result
    }

    async fn round_trip<B, R>(&self, route: Route<'_>, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Default,
    {
        let context = route.context();
        let url = route.url(&self.config.base_url)?;

        let mut req = self
            .client
            .request(route.method(), url)
            .timeout(self.config.timeout);
        if let Some(app_id) = identity_header(&self.config, context)? {
            req = req.header(APP_ID_HEADER, app_id);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let http_response = req
            .send()
            .await
            .map_err(|source| ClientError::Http { context, source })?;
        let status = http_response.status();
        let bytes = http_response
            .bytes()
            .await
            .map_err(|source| ClientError::ResponseBodyRead { context, source })?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(%status, bytes = bytes.len(), "a2e.client.response");

        decode_response(context, status, &bytes)
    }
}

/// Returns the `X-App-ID` value when both ID and secret are configured.
///
/// The secret is reserved for request signing, which the platform does not
/// define yet; it is never sent.
pub(crate) fn identity_header(
    config: &ClientConfig,
    context: &'static str,
) -> Result<Option<HeaderValue>, ClientError> {
    match config.app_id.as_deref() {
        Some(app_id) if config.has_identity() => HeaderValue::from_str(app_id)
            .map(Some)
            .map_err(|source| ClientError::InvalidHeader {
                context,
                header: APP_ID_HEADER,
                source,
            }),
        _ => Ok(None),
    }
}

/// Decodes a response body: envelope first, payload after the status check.
pub(crate) fn decode_response<R>(
    context: &'static str,
    status: StatusCode,
    body: &[u8],
) -> Result<R, ClientError>
where
    R: DeserializeOwned + Default,
{
    let envelope = Envelope::from_slice(body).map_err(|source| ClientError::EnvelopeDecode {
        context,
        status,
        source,
    })?;
    envelope.into_result().map_err(|err| match err {
        EnvelopeError::Api(api) => ClientError::Api(api),
        EnvelopeError::Payload(source) => ClientError::PayloadDecode { context, source },
    })
}

/// Marks the operation span `OK` or `ERROR`.
///
/// An envelope with a non-zero code counts as an error here, the same as a
/// transport or decoding failure.
#[cfg(feature = "telemetry")]
pub(crate) fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::error!(error = %err, "A2E call failed");
        }
    }
}

/// Span bookkeeping is compiled out without `telemetry`.
#[cfg(not(feature = "telemetry"))]
pub(crate) fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

/// Logs a business-level failure carried by a successful execution.
#[cfg(feature = "telemetry")]
pub(crate) fn record_execution_failure(result: &Result<ExecuteResult, ClientError>) {
    if let Ok(ExecuteResult {
        error: Some(err), ..
    }) = result
    {
        tracing::warn!(code = %err.code, message = %err.message, "Execution reported a failure");
    }
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn record_execution_failure(_result: &Result<ExecuteResult, ClientError>) {}
