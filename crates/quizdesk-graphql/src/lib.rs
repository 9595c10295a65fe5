//! Provides GraphQL middleware for quizdesk HTTP services
//!
//! A [`Script`] is classified once, paired with its variables in a
//! [`GraphQLRequest`], and sent through a [`GraphQLService`] which POSTs
//! `{"query", "variables"}` to the configured endpoint. The service resolves
//! with whatever GraphQL body the server answered, whatever the HTTP status;
//! interpreting `errors` is left to the caller.

mod client;
mod error;
mod script;
mod service;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub use client::{GraphQLClient, GraphQLClientFactory};
pub use error::GraphQLServiceError;
pub use script::{Script, ScriptArg, ScriptError, ScriptKind};
pub use service::{GraphQLLayer, GraphQLService};

/// The GraphQL response body, with `data` left as raw JSON
pub type GraphQLResponse = graphql_client::Response<Value>;

/// A single entry of a response's `errors` array
pub type GraphQLError = graphql_client::Error;

/// A [`Script`] paired with the variables it is sent with
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLRequest {
    script: Script,
    variables: Option<Value>,
}

impl GraphQLRequest {
    pub const fn new(script: Script, variables: Option<Value>) -> GraphQLRequest {
        GraphQLRequest { script, variables }
    }

    pub const fn script(&self) -> &Script {
        &self.script
    }

    pub const fn variables(&self) -> Option<&Value> {
        self.variables.as_ref()
    }

    pub(crate) fn body(&self) -> RequestBody<'_> {
        RequestBody {
            query: self.script.text(),
            variables: self.variables.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a Value>,
}

impl fmt::Display for GraphQLRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.script.kind(), self.script.name())
    }
}
