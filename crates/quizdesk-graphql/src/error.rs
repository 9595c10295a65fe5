use bytes::Bytes;
use http::{uri::InvalidUri, StatusCode};

/// Why a [`GraphQLService`](crate::GraphQLService) produced no [`GraphQLResponse`](crate::GraphQLResponse)
#[derive(thiserror::Error, Debug)]
pub enum GraphQLServiceError {
    /// The variables could not be written as JSON
    #[error("Could not encode the request: {0}")]
    Encode(#[source] serde_json::Error),
    /// The endpoint answered with something other than a GraphQL body
    #[error("The endpoint answered {status} without a GraphQL response body")]
    NotGraphQL {
        /// Why the body did not parse
        #[source]
        source: serde_json::Error,
        /// The body as received
        body: Bytes,
        /// The HTTP status it came with
        status: StatusCode,
    },
    /// The HTTP request could not be assembled
    #[error("Could not build the HTTP request: {0}")]
    Request(#[from] http::Error),
    /// The endpoint URL is not usable as a request URI
    #[error("The endpoint is not a valid URI: {0}")]
    InvalidEndpoint(#[from] InvalidUri),
    /// The HTTP transport failed before a response arrived
    #[error("The HTTP transport failed: {0}")]
    UpstreamService(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl GraphQLServiceError {
    pub(crate) fn upstream<E>(err: E) -> GraphQLServiceError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GraphQLServiceError::UpstreamService(Box::new(err))
    }
}
