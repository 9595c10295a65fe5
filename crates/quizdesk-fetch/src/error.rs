use std::sync::Arc;

use quizdesk_graphql::{GraphQLError, GraphQLServiceError};

/// Why a query or mutation produced no data
#[derive(thiserror::Error, Debug, Clone)]
pub enum FetchError {
    /// The server answered with an `errors` array; `message` is the first entry's
    #[error("{message}")]
    GraphQL {
        message: String,
        errors: Vec<GraphQLError>,
    },
    /// The request never produced a GraphQL response
    #[error(transparent)]
    Transport(Arc<GraphQLServiceError>),
    /// The runtime shut down before the request finished
    #[error("The request was abandoned before it finished")]
    Interrupted,
}

impl FetchError {
    pub const fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

impl From<GraphQLServiceError> for FetchError {
    fn from(value: GraphQLServiceError) -> Self {
        FetchError::Transport(Arc::new(value))
    }
}

/// Errors from navigating a cursor-paginated connection
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("No page has been loaded yet")]
    NotLoaded,
    #[error("There is no next page")]
    NoNextPage,
    #[error("There is no previous page")]
    NoPreviousPage,
    #[error("Response data is not a connection: {0}")]
    NotAConnection(String),
}
