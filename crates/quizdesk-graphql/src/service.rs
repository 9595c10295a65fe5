use std::{
    str::FromStr,
    task::{Context, Poll},
};

use bytes::Bytes;
use http::{header::CONTENT_TYPE, HeaderValue, Uri};
use http_body_util::Full;
use quizdesk_http::{
    service::{read_body, replace_ready_service, ResponseFuture},
    HttpRequest, HttpResponse,
};
use tower::{Layer, Service};
use url::Url;

use crate::{GraphQLRequest, GraphQLResponse, GraphQLServiceError};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Wraps an HTTP service in a [`GraphQLService`] bound to one endpoint
#[derive(Clone, Debug)]
pub struct GraphQLLayer {
    endpoint: Url,
}

impl GraphQLLayer {
    pub const fn new(endpoint: Url) -> GraphQLLayer {
        GraphQLLayer { endpoint }
    }
}

impl<S> Layer<S> for GraphQLLayer {
    type Service = GraphQLService<S>;

    fn layer(&self, http: S) -> GraphQLService<S> {
        GraphQLService::new(self.endpoint.clone(), http)
    }
}

/// POSTs each [`GraphQLRequest`] to its endpoint and parses the reply.
///
/// Any HTTP status is accepted as long as the body parses as a GraphQL
/// response; a 4xx carrying `errors` resolves successfully.
#[derive(Clone, Debug)]
pub struct GraphQLService<S> {
    endpoint: Url,
    http: S,
}

impl<S> GraphQLService<S> {
    pub const fn new(endpoint: Url, http: S) -> GraphQLService<S> {
        GraphQLService { endpoint, http }
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn encode(endpoint: &Url, req: &GraphQLRequest) -> Result<HttpRequest, GraphQLServiceError> {
    let body = serde_json::to_vec(&req.body()).map_err(GraphQLServiceError::Encode)?;
    Ok(http::Request::post(Uri::from_str(endpoint.as_str())?)
        .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
        .body(Full::new(Bytes::from(body)))?)
}

async fn decode(resp: HttpResponse) -> Result<GraphQLResponse, GraphQLServiceError> {
    let (parts, body) = resp.into_parts();
    let Ok(body) = read_body(body).await;
    tracing::trace!(status = %parts.status, bytes = body.len(), "received GraphQL response");
    serde_json::from_slice(&body).map_err(|source| GraphQLServiceError::NotGraphQL {
        source,
        body,
        status: parts.status,
    })
}

impl<S> Service<GraphQLRequest> for GraphQLService<S>
where
    S: Service<HttpRequest, Response = HttpResponse> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    type Response = GraphQLResponse;
    type Error = GraphQLServiceError;
    type Future = ResponseFuture<Result<GraphQLResponse, GraphQLServiceError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), GraphQLServiceError>> {
        self.http.poll_ready(cx).map_err(GraphQLServiceError::upstream)
    }

    fn call(&mut self, req: GraphQLRequest) -> Self::Future {
        let mut http = replace_ready_service(&mut self.http);
        let encoded = encode(&self.endpoint, &req);
        tracing::debug!(
            operation = req.script().name(),
            kind = %req.script().kind(),
            endpoint = %self.endpoint,
            "sending GraphQL request"
        );
        Box::pin(async move {
            let resp = http
                .call(encoded?)
                .await
                .map_err(GraphQLServiceError::upstream)?;
            decode(resp).await
        })
    }
}
