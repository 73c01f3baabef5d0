//! A blocking client for callers without an async runtime.
//!
//! [`ProtocolClient`] mirrors [`crate::ProtocolClient`] operation for
//! operation, on top of `reqwest::blocking`. Routes, the `X-App-ID` rule and
//! envelope decoding are shared with the async client, so both report the
//! same [`ClientError`] for the same response.
//!
//! Requires the `blocking` feature. As with `reqwest::blocking`, the client
//! must not be created, used or dropped inside an async runtime.
//!
//! ```no_run
//! use a2e::SearchRequest;
//! use a2e_http::ClientConfig;
//! use a2e_http::blocking::ProtocolClient;
//!
//! # fn run() -> Result<(), a2e_http::ClientError> {
//! let client = ProtocolClient::new(ClientConfig::default());
//! let found = client.search_services(&SearchRequest::new("coffee"))?;
//! println!("{} services", found.total);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use a2e::{
    AuthRequest, AuthResult, ExecuteRequest, ExecuteResult, ProtocolDocument, SearchRequest,
    SearchResult,
};
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::client::{
    decode_response, identity_header, record_execution_failure, record_result_on_span,
};
use crate::config::{ClientConfig, ConfigError};
use crate::constants::APP_ID_HEADER;
use crate::error::ClientError;
use crate::route::Route;

/// A blocking client for the A2E open platform.
///
/// [`ClientConfig::http_client`] holds an async client and is ignored here;
/// use [`ProtocolClient::with_http_client`] to inject a blocking one.
#[derive(Clone, Debug)]
pub struct ProtocolClient {
    config: ClientConfig,
    client: Client,
}

impl From<ClientConfig> for ProtocolClient {
    fn from(config: ClientConfig) -> Self {
        Self::new(config)
    }
}

impl ProtocolClient {
    /// Creates a client with a default blocking reqwest client.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Client::default())
    }

    /// Creates a client around a pre-configured blocking reqwest client.
    #[must_use]
    pub fn with_http_client(mut config: ClientConfig, client: Client) -> Self {
        config.http_client = None;
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
    /// # Errors
    ///
    /// See [`crate::ProtocolClient::search_services`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.blocking.search_services",
            skip_all,
            fields(
                keyword = %request.keyword,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub fn search_services(&self, request: &SearchRequest) -> Result<SearchResult, ClientError> {
        self.call(Route::Search, Some(request))
    }

    /// Fetches the protocol document of a service.
    ///
    /// # Errors
    ///
    /// See [`crate::ProtocolClient::get_protocol`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.blocking.get_protocol",
            skip_all,
            fields(
                service_id = %service_id,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub fn get_protocol(&self, service_id: &str) -> Result<ProtocolDocument, ClientError> {
        self.call::<(), _>(Route::Protocol { service_id }, None)
    }

    /// Exchanges an authorization code for a consumer token.
    ///
    /// # Errors
    ///
    /// See [`crate::ProtocolClient::get_consumer_token`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.blocking.get_consumer_token",
            skip_all,
            fields(
                auth_type = %request.auth_type,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub fn get_consumer_token(&self, request: &AuthRequest) -> Result<AuthResult, ClientError> {
        self.call(Route::ConsumerToken, Some(request))
    }

    /// Executes a service endpoint.
    ///
    /// Business-level failures come back in [`ExecuteResult::error`].
    ///
    /// # Errors
    ///
    /// See [`crate::ProtocolClient::execute`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "a2e.blocking.execute",
            skip_all,
            fields(
                service_id = %request.service_id,
                endpoint = %request.endpoint,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ClientError> {
        let route = Route::Execute {
            service_id: &request.service_id,
            endpoint: &request.endpoint,
        };
        let result = self.call(route, Some(&request.body()));
        record_execution_failure(&result);
        result
    }

    fn call<B, R>(&self, route: Route<'_>, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned + Default,
    {
        let result = self.round_trip(route, body);
        record_result_on_span(&result);
        result
    }

    fn round_trip<B, R>(&self, route: Route<'_>, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
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
            .map_err(|source| ClientError::Http { context, source })?;
        let status = http_response.status();
        let bytes = http_response
            .bytes()
            .map_err(|source| ClientError::ResponseBodyRead { context, source })?;

        decode_response(context, status, &bytes)
    }
}
