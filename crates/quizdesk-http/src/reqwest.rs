use std::{
    task::{Context, Poll},
    time::Duration,
};

use http_body_util::Full;
use tower::{util::BoxCloneService, Service, ServiceBuilder, ServiceExt};

use crate::{
    service::{read_body, replace_ready_service, ResponseFuture},
    HttpRequest, HttpResponse, HttpService, HttpServiceConfig, HttpServiceError,
    HttpServiceFactory, DEFAULT_TIMEOUT,
};

type RawClient = BoxCloneService<reqwest::Request, reqwest::Response, HttpServiceError>;

/// Hands out [`ReqwestService`]s sharing one connection pool
#[derive(Clone, Debug)]
pub struct ReqwestServiceFactory {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestServiceFactory {
    /// Uses `client` for every service, with the timeout from `config`
    pub fn new(config: HttpServiceConfig, client: reqwest::Client) -> ReqwestServiceFactory {
        ReqwestServiceFactory {
            client,
            timeout: config.timeout().unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Same as [`ReqwestServiceFactory::new`] with a client using reqwest's defaults
    pub fn from_config(config: HttpServiceConfig) -> Result<ReqwestServiceFactory, HttpServiceError> {
        let client = reqwest::Client::builder().build()?;
        Ok(ReqwestServiceFactory::new(config, client))
    }

    /// The timeout each produced service enforces
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HttpServiceFactory for ReqwestServiceFactory {
    fn create(&self) -> Result<HttpService, HttpServiceError> {
        Ok(ReqwestService::new(self.client.clone(), self.timeout).boxed_clone())
    }
}

/// Sends buffered [`http`] requests through [`reqwest`], giving up after a fixed timeout
#[derive(Clone, Debug)]
pub struct ReqwestService {
    inner: RawClient,
}

impl ReqwestService {
    /// Wraps `client`; requests running longer than `timeout` fail with [`HttpServiceError::TimedOut`]
    pub fn new(client: reqwest::Client, timeout: Duration) -> ReqwestService {
        tracing::trace!(?timeout, "building reqwest service");
        let inner = ServiceBuilder::new()
            .map_err(HttpServiceError::from)
            .timeout(timeout)
            .service(client)
            .boxed_clone();
        ReqwestService { inner }
    }
}

async fn to_reqwest(req: HttpRequest) -> Result<reqwest::Request, HttpServiceError> {
    let (parts, body) = req.into_parts();
    let Ok(body) = read_body(body).await;
    Ok(reqwest::Request::try_from(http::Request::from_parts(
        parts, body,
    ))?)
}

async fn from_reqwest(resp: reqwest::Response) -> Result<HttpResponse, HttpServiceError> {
    let (parts, body) = http::Response::from(resp).into_parts();
    let body = read_body(body).await?;
    tracing::debug!(status = %parts.status, bytes = body.len(), "received response");
    Ok(http::Response::from_parts(parts, Full::new(body)))
}

impl Service<HttpRequest> for ReqwestService {
    type Response = HttpResponse;
    type Error = HttpServiceError;
    type Future = ResponseFuture<Result<HttpResponse, HttpServiceError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), HttpServiceError>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: HttpRequest) -> Self::Future {
        let mut inner = replace_ready_service(&mut self.inner);
        Box::pin(async move {
            let req = to_reqwest(req).await?;
            tracing::debug!(method = %req.method(), url = %req.url(), "sending request");
            let resp = inner.call(req).await?;
            from_reqwest(resp).await
        })
    }
}
