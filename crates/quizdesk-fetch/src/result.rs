use derive_getters::Getters;
use quizdesk_graphql::GraphQLResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::FetchError;

/// The observable state of a query or mutation
#[derive(Debug, Clone, Default, Getters)]
pub struct QueryResult {
    data: Option<Value>,
    error: Option<FetchError>,
    loading: bool,
}

impl QueryResult {
    pub(crate) const fn pending() -> QueryResult {
        QueryResult {
            data: None,
            error: None,
            loading: true,
        }
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Deserializes `data` into `T`, if there is any
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data.clone().map(serde_json::from_value)
    }

    /// `(data, error, loading)`
    pub fn into_parts(self) -> (Option<Value>, Option<FetchError>, bool) {
        (self.data, self.error, self.loading)
    }
}

impl From<Result<Option<Value>, FetchError>> for QueryResult {
    fn from(value: Result<Option<Value>, FetchError>) -> Self {
        match value {
            Ok(data) => QueryResult {
                data,
                error: None,
                loading: false,
            },
            Err(error) => QueryResult {
                data: None,
                error: Some(error),
                loading: false,
            },
        }
    }
}

/// Interprets a response: the first GraphQL error wins over any partial data
pub(crate) fn interpret(
    outcome: Result<GraphQLResponse, quizdesk_graphql::GraphQLServiceError>,
) -> Result<Option<Value>, FetchError> {
    let response = outcome?;
    match response.errors {
        Some(errors) if !errors.is_empty() => Err(FetchError::GraphQL {
            message: errors[0].message.clone(),
            errors,
        }),
        _ => Ok(response.data),
    }
}
