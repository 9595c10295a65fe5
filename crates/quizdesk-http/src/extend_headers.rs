//! Injects a fixed set of default headers into every outgoing request

use std::task::{Context, Poll};

use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderMap, HeaderValue,
};
use tower::{Layer, Service};

use crate::HttpServiceError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Builds the headers every GraphQL request carries.
///
/// `Content-Type: application/json` is always present; `Authorization: Bearer <token>`
/// is added only when a token is supplied.
pub fn default_headers(bearer_token: Option<&str>) -> Result<HeaderMap, HttpServiceError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    if let Some(token) = bearer_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Stamps a fixed [`HeaderMap`] onto every request passing through.
///
/// Entries in the map replace whatever the caller set under the same name;
/// other caller headers are left alone.
#[derive(Clone, Debug)]
pub struct ExtendHeadersLayer(HeaderMap);

impl ExtendHeadersLayer {
    /// Layer stamping `headers`
    pub fn new(headers: impl Into<HeaderMap>) -> ExtendHeadersLayer {
        ExtendHeadersLayer(headers.into())
    }
}

impl<S> Layer<S> for ExtendHeadersLayer {
    type Service = ExtendHeaders<S>;

    fn layer(&self, inner: S) -> ExtendHeaders<S> {
        ExtendHeaders::new(self.0.clone(), inner)
    }
}

/// See [`ExtendHeadersLayer`]
#[derive(Clone, Debug)]
pub struct ExtendHeaders<S> {
    defaults: HeaderMap,
    inner: S,
}

impl<S> ExtendHeaders<S> {
    /// Stamps `defaults` onto requests before handing them to `inner`
    pub const fn new(defaults: HeaderMap, inner: S) -> ExtendHeaders<S> {
        ExtendHeaders { defaults, inner }
    }
}

impl<B, S> Service<http::Request<B>> for ExtendHeaders<S>
where
    S: Service<http::Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<B>) -> S::Future {
        let headers = req.headers_mut();
        for (name, value) in &self.defaults {
            headers.insert(name, value.clone());
        }
        self.inner.call(req)
    }
}
