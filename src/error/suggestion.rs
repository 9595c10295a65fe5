use std::fmt::{self, Display};

use quizdesk_fetch::{FetchError, PaginationError};
use quizdesk_graphql::{GraphQLServiceError, ScriptError};
use quizdesk_http::HttpServiceError;
use quizdesk_store::StoreError;

use crate::utils::{env::QuizdeskEnvKey, style::Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizdeskErrorSuggestion {
    SignIn,
    CheckEndpoint,
    IncreaseTimeout,
    CheckScript,
    CheckVariables,
    FewerPages,
}

impl QuizdeskErrorSuggestion {
    /// Picks a suggestion from the first error in the chain we recognize
    pub(crate) fn for_error(error: &anyhow::Error) -> Option<QuizdeskErrorSuggestion> {
        error.chain().find_map(|cause| {
            if let Some(StoreError::NotSignedIn) = cause.downcast_ref::<StoreError>() {
                return Some(QuizdeskErrorSuggestion::SignIn);
            }
            if cause.downcast_ref::<ScriptError>().is_some() {
                return Some(QuizdeskErrorSuggestion::CheckScript);
            }
            if cause.downcast_ref::<serde_json::Error>().is_some() {
                return Some(QuizdeskErrorSuggestion::CheckVariables);
            }
            if let Some(
                PaginationError::NoNextPage | PaginationError::NoPreviousPage,
            ) = cause.downcast_ref::<PaginationError>()
            {
                return Some(QuizdeskErrorSuggestion::FewerPages);
            }
            match cause.downcast_ref::<FetchError>() {
                Some(FetchError::Transport(transport)) => for_transport(transport),
                _ => None,
            }
        })
    }
}

fn for_transport(error: &GraphQLServiceError) -> Option<QuizdeskErrorSuggestion> {
    match error {
        GraphQLServiceError::NotGraphQL { .. } | GraphQLServiceError::InvalidEndpoint(_) => {
            Some(QuizdeskErrorSuggestion::CheckEndpoint)
        }
        GraphQLServiceError::UpstreamService(source) => {
            let http = source.downcast_ref::<HttpServiceError>()?;
            if http.is_timeout() {
                Some(QuizdeskErrorSuggestion::IncreaseTimeout)
            } else if http.is_connect() {
                Some(QuizdeskErrorSuggestion::CheckEndpoint)
            } else {
                None
            }
        }
        _ => None,
    }
}

impl Display for QuizdeskErrorSuggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suggestion = match self {
            QuizdeskErrorSuggestion::SignIn => format!(
                "Sign in with {} or set {}",
                Style::Command.paint("quizdesk session login --token <TOKEN>"),
                Style::Command.paint(QuizdeskEnvKey::Token.to_string())
            ),
            QuizdeskErrorSuggestion::CheckEndpoint => format!(
                "Check that a GraphQL server is listening at the endpoint set with {} or {}",
                Style::Command.paint("--endpoint"),
                Style::Command.paint(QuizdeskEnvKey::GraphqlUrl.to_string())
            ),
            QuizdeskErrorSuggestion::IncreaseTimeout => format!(
                "Try again with a longer timeout in {}",
                Style::Command.paint(QuizdeskEnvKey::TimeoutSecs.to_string())
            ),
            QuizdeskErrorSuggestion::CheckScript => {
                "Scripts must start with `query`, `mutation` or `fragment`, and interpolated values must be fragments"
                    .to_string()
            }
            QuizdeskErrorSuggestion::CheckVariables => format!(
                "Pass a JSON object to {}, for example {}",
                Style::Command.paint("--variables"),
                Style::Command.paint(r#"'{"id": "1"}'"#)
            ),
            QuizdeskErrorSuggestion::FewerPages => {
                "The list has fewer pages than requested; try a smaller --page".to_string()
            }
        };
        write!(formatter, "{} {}", Style::HintPrefix.paint("HINT:"), suggestion)
    }
}
