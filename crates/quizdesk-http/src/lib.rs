#![warn(missing_docs)]

//! The HTTP transport under quizdesk's GraphQL client.
//!
//! Everything is a [`tower::Service`] over [`http`] types, so the GraphQL
//! layer, header injection and the [`reqwest`](::reqwest) backend compose with
//! `ServiceBuilder` and can each be swapped for a mock in tests.

use std::time::Duration;

use buildstructor::Builder;
use bytes::Bytes;
use derive_getters::Getters;
use http_body_util::Full;
use tower::util::BoxCloneService;

mod error;
pub mod extend_headers;
mod reqwest;
pub mod service;

pub use error::HttpServiceError;
pub use reqwest::{ReqwestService, ReqwestServiceFactory};

/// Install ring as the default rustls crypto provider for every binary that links this crate.
#[ctor::ctor]
fn install_ring_crypto_provider() {
    // fails only when a provider is already installed
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();
}

/// A buffered request; GraphQL bodies are small enough to hold in memory
pub type HttpRequest = http::Request<Full<Bytes>>;
/// A buffered response
pub type HttpResponse = http::Response<Full<Bytes>>;
/// Any cloneable service that sends an [`HttpRequest`]
pub type HttpService = BoxCloneService<HttpRequest, HttpResponse, HttpServiceError>;

/// Applied when [`HttpServiceConfig::timeout`] is unset
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Produces [`HttpService`]s.
///
/// Services must be `mut` to be driven, so consumers hold a factory and layer
/// the produced service themselves rather than sharing one client object.
pub trait HttpServiceFactory {
    /// Produces an [`HttpService`]
    #[allow(clippy::result_large_err)]
    fn create(&self) -> Result<HttpService, HttpServiceError>;
}

/// Settings shared by every [`HttpService`] backend
#[derive(Clone, Debug, Builder, Default, Getters)]
pub struct HttpServiceConfig {
    /// Per-request timeout; [`DEFAULT_TIMEOUT`] when `None`
    timeout: Option<Duration>,
}
