use clap::Parser;
use quizdesk_fetch::{GraphQLClient, Mutation};
use quizdesk_graphql::ScriptKind;
use quizdesk_store::Store;

use crate::command::{QuizdeskOutput, ScriptOpts};
use crate::QuizdeskResult;

#[derive(Debug, Parser)]
/// Run a mutation and print its data
pub struct Mutate {
    #[command(flatten)]
    opts: ScriptOpts,
}

impl Mutate {
    pub async fn run(&self, client: GraphQLClient, store: &Store) -> QuizdeskResult<QuizdeskOutput> {
        let script = self.opts.load(ScriptKind::Mutation)?;
        self.opts.remember(store);

        let data = Mutation::new(client, script)
            .execute(self.opts.variables.clone())
            .await?;
        Ok(QuizdeskOutput::Data(data))
    }
}
