use anyhow::anyhow;
use clap::Parser;
use quizdesk_fetch::{ConnectionQuery, GraphQLClient, PaginationError};
use quizdesk_graphql::ScriptKind;
use quizdesk_store::Store;
use serde_json::{Map, Value};

use crate::command::{QuizdeskOutput, ScriptOpts};
use crate::{QuizdeskError, QuizdeskErrorSuggestion, QuizdeskResult};

#[derive(Debug, Parser)]
/// Fetch one page of a Relay connection
///
/// The query must select a single connection field and accept `first`, `after`,
/// `last`, `before` and `skipPages` variables.
pub struct Page {
    #[command(flatten)]
    opts: ScriptOpts,

    /// How many nodes to fetch per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// Zero-based page to fetch. Pages past the first are reached by walking cursors.
    #[arg(long, value_name = "K", default_value_t = 0)]
    page: usize,
}

impl Page {
    pub async fn run(&self, client: GraphQLClient, store: &Store) -> QuizdeskResult<QuizdeskOutput> {
        let script = self.opts.load(ScriptKind::Query)?;
        let base = match self.opts.variables.clone() {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(base)) => base,
            Some(other) => {
                return Err(QuizdeskError::new(anyhow!(
                    "--variables must be a JSON object, got `{other}`"
                ))
                .with_suggestion(QuizdeskErrorSuggestion::CheckVariables));
            }
        };
        self.opts.remember(store);

        let mut list = ConnectionQuery::new(client, script, base, self.page_size);
        loaded(&list).await?;
        if self.page > 0 {
            list.paginate_to(self.page)?;
            loaded(&list).await?;
        }

        let connection = list.connection().ok_or(PaginationError::NotLoaded)??;
        Ok(QuizdeskOutput::Page {
            page_index: list.page_index(),
            nodes: connection.nodes().clone(),
            page_info: connection.page_info().clone(),
        })
    }
}

async fn loaded(list: &ConnectionQuery) -> QuizdeskResult<()> {
    let result = list.settled().await;
    match result.error() {
        Some(error) => Err(error.clone().into()),
        None => Ok(()),
    }
}
