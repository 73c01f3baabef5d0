#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP client for the A2E (Agent-to-Everything) protocol.
//!
//! [`ProtocolClient`] searches the service catalog, fetches protocol
//! documents, obtains consumer tokens and executes service endpoints. Every
//! response is unwrapped from the uniform [`a2e::Envelope`] into either a
//! typed result or a [`ClientError`].
//!
//! # Example
//!
//! ```no_run
//! use a2e::{AuthRequest, ExecuteRequest, SearchRequest};
//! use a2e_http::{ClientConfig, ProtocolClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ProtocolClient::new(
//!     ClientConfig::default()
//!         .with_app_id("app-123")
//!         .with_app_secret("s3cret")
//!         .with_timeout_secs(10),
//! );
//!
//! let found = client.search_services(&SearchRequest::new("translate")).await?;
//! let service = &found.list[0];
//! let protocol = client.get_protocol(&service.id).await?;
//!
//! let token = client
//!     .get_consumer_token(&AuthRequest::new("sms", "123456"))
//!     .await?;
//!
//! let endpoint = &protocol.endpoints[0].name;
//! let result = client
//!     .execute(
//!         &ExecuteRequest::new(&service.id, endpoint, &token.consumer_token)
//!             .with_input("text", "hello"),
//!     )
//!     .await?;
//!
//! if let Some(err) = &result.error {
//!     eprintln!("execution failed: {err}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - `blocking` - A blocking `ProtocolClient` (feature `blocking`)
//! - [`client`] - The [`ProtocolClient`]
//! - [`config`] - [`ClientConfig`] builder and environment loading
//! - [`constants`] - Default URL, timeout, header names and env variables
//! - [`error`] - [`ClientError`]
//! - [`route`] - Path construction for each operation
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables `tracing` spans around every operation
//! - `blocking` - Enables the `blocking` client on `reqwest::blocking`

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod route;

pub use client::ProtocolClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
