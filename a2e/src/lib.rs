#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Wire format types for the A2E (Agent-to-Everything) protocol.
//!
//! A2E lets an agent discover services in a remote catalog, read a
//! machine-readable protocol document describing a chosen service, obtain
//! a consumer token on behalf of a user, and execute one of the service's
//! endpoints with structured input.
//!
//! This crate contains only the wire contract: request and result value
//! types, the uniform response [`Envelope`], and the error values surfaced
//! when an envelope reports failure. It performs no I/O. The HTTP client
//! lives in the `a2e-http` crate.
//!
//! # Modules
//!
//! - [`envelope`] - Response envelope and the two-phase payload decode
//! - [`error`] - [`ApiError`] for non-zero envelope codes
//! - [`search`] - Service catalog search types
//! - [`protocol`] - Protocol document (service descriptor) types
//! - [`auth`] - Consumer token acquisition types
//! - [`execute`] - Endpoint execution types and [`ExecuteError`]

pub mod auth;
pub mod envelope;
pub mod error;
pub mod execute;
pub mod protocol;
pub mod search;

pub use auth::{AuthRequest, AuthResult, UserInfo};
pub use envelope::{Envelope, EnvelopeError};
pub use error::ApiError;
pub use execute::{ExecuteBody, ExecuteError, ExecuteRequest, ExecuteResult, JsonMap};
pub use protocol::{
    AuthMethod, Authentication, Endpoint, ErrorCode, ErrorHandling, Permission, Permissions,
    ProtocolDocument, Semantic, ServiceInfo,
};
pub use search::{Location, Provider, SearchRequest, SearchResult, Service};
