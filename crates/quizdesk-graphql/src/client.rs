use buildstructor::buildstructor;
use http::{header::USER_AGENT, HeaderValue};
use quizdesk_http::{
    extend_headers::{default_headers, ExtendHeadersLayer},
    HttpService, HttpServiceError,
};
use tower::{util::BoxCloneService, ServiceBuilder, ServiceExt};
use url::Url;

use crate::{GraphQLLayer, GraphQLRequest, GraphQLResponse, GraphQLServiceError};

/// The service every data-fetching handle is constructed with
pub type GraphQLClient = BoxCloneService<GraphQLRequest, GraphQLResponse, GraphQLServiceError>;

/// Assembles a [`GraphQLClient`] from an endpoint, credentials and an [`HttpService`].
///
/// `client_name` is sent as the `User-Agent` of every request.
///
/// Headers are fixed when the factory is built; a client never observes a
/// token change. Build a new factory after signing in or out.
#[derive(Clone)]
pub struct GraphQLClientFactory {
    endpoint: Url,
    headers: http::HeaderMap,
    http_service: HttpService,
}

#[buildstructor]
impl GraphQLClientFactory {
    #[builder]
    pub fn new(
        endpoint: Url,
        http_service: HttpService,
        bearer_token: Option<String>,
        client_name: Option<String>,
        headers: Option<http::HeaderMap>,
    ) -> Result<GraphQLClientFactory, HttpServiceError> {
        let mut merged = headers.unwrap_or_default();
        if let Some(client_name) = client_name {
            merged.insert(USER_AGENT, HeaderValue::from_str(&client_name)?);
        }
        merged.extend(default_headers(bearer_token.as_deref())?);
        tracing::debug!(
            %endpoint,
            authenticated = bearer_token.is_some(),
            "configured GraphQL client"
        );
        Ok(GraphQLClientFactory {
            endpoint,
            headers: merged,
            http_service,
        })
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn create(&self) -> GraphQLClient {
        ServiceBuilder::new()
            .layer(GraphQLLayer::new(self.endpoint.clone()))
            .layer(ExtendHeadersLayer::new(self.headers.clone()))
            .service(self.http_service.clone())
            .boxed_clone()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use bytes::Bytes;
    use http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
    use http_body_util::Full;
    use quizdesk_http::{HttpRequest, HttpService, HttpServiceError};
    use serde_json::json;
    use speculoos::prelude::*;
    use tower::{service_fn, ServiceExt};
    use url::Url;

    use super::GraphQLClientFactory;
    use crate::{GraphQLRequest, Script};

    fn mock_http(expected_authorization: Option<&'static str>) -> HttpService {
        service_fn(move |req: HttpRequest| async move {
            assert_that!(req.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()))
                .is_equal_to(Some(b"application/json".as_slice()));
            assert_that!(req.headers().get("x-client").map(|v| v.as_bytes()))
                .is_equal_to(Some(b"quizdesk".as_slice()));
            assert_that!(req.headers().get(AUTHORIZATION).map(|v| v.to_str().unwrap()))
                .is_equal_to(expected_authorization);
            Ok::<_, HttpServiceError>(http::Response::new(Full::new(Bytes::from_static(
                br#"{"data":{"me":null}}"#,
            ))))
        })
        .boxed_clone()
    }

    async fn send(factory: GraphQLClientFactory) -> Result<()> {
        let script = Script::parse("query Me { me { id } }")?;
        let response = factory
            .create()
            .oneshot(GraphQLRequest::new(script, None))
            .await?;
        assert_that!(response.data).is_equal_to(Some(json!({ "me": null })));
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_clients_send_no_authorization() -> Result<()> {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-client", "quizdesk".parse()?);
        let factory = GraphQLClientFactory::builder()
            .endpoint(Url::parse("http://example.com/graphql")?)
            .http_service(mock_http(None))
            .headers(headers)
            .build()?;
        send(factory).await
    }

    #[tokio::test]
    async fn signed_in_clients_send_a_bearer_token() -> Result<()> {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-client", "quizdesk".parse()?);
        let factory = GraphQLClientFactory::builder()
            .endpoint(Url::parse("http://example.com/graphql")?)
            .http_service(mock_http(Some("Bearer s3cret")))
            .bearer_token("s3cret")
            .headers(headers)
            .build()?;
        send(factory).await
    }

    #[tokio::test]
    async fn client_name_is_the_user_agent() -> Result<()> {
        let http = service_fn(|req: HttpRequest| async move {
            assert_that!(req.headers().get(USER_AGENT).map(|v| v.as_bytes()))
                .is_equal_to(Some(b"quizdesk/1.2.3".as_slice()));
            Ok::<_, HttpServiceError>(http::Response::new(Full::new(Bytes::from_static(
                br#"{"data":{"me":null}}"#,
            ))))
        })
        .boxed_clone();
        let factory = GraphQLClientFactory::builder()
            .endpoint(Url::parse("http://example.com/graphql")?)
            .http_service(http)
            .client_name("quizdesk/1.2.3")
            .build()?;
        send(factory).await
    }
}
