use clap::Parser;
use quizdesk_fetch::GraphQLClient;
use quizdesk_graphql::ScriptKind;
use quizdesk_store::Store;
use serde_json::Value;

use crate::command::{QuizdeskOutput, ScriptOpts};
use crate::QuizdeskResult;

#[derive(Debug, Parser)]
/// Run a query and print its data
pub struct Query {
    #[command(flatten)]
    opts: ScriptOpts,
}

impl Query {
    pub async fn run(&self, client: GraphQLClient, store: &Store) -> QuizdeskResult<QuizdeskOutput> {
        let script = self.opts.load(ScriptKind::Query)?;
        self.opts.remember(store);

        let query = quizdesk_fetch::Query::new(client, Some(script), self.opts.variables.clone());
        let (data, error, _) = query.settled().await.into_parts();
        if let Some(error) = error {
            return Err(error.into());
        }
        Ok(QuizdeskOutput::Data(data.unwrap_or(Value::Null)))
    }
}
