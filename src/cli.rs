use std::time::Duration;

use anyhow::anyhow;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use quizdesk_fetch::GraphQLClient;
use quizdesk_graphql::GraphQLClientFactory;
use quizdesk_http::{HttpServiceConfig, HttpServiceFactory, ReqwestServiceFactory};
use quizdesk_log::Level;
use quizdesk_store::{Config, Session, Store};
use url::Url;

use crate::command::{self, QuizdeskOutput};
use crate::utils::env::{QuizdeskEnv, QuizdeskEnvKey};
use crate::{QuizdeskError, QuizdeskResult, DEFAULT_ENDPOINT, PKG_NAME, PKG_VERSION};

#[derive(Debug, Parser)]
#[command(
    name = "quizdesk",
    version,
    about = "
Quizdesk - GraphQL console for the trivia and blog admin

Sign in once with:

    $ quizdesk session login --token <TOKEN>

Then run operations stored in files:

    $ quizdesk query questions.graphql --variables '{\"first\": 5}'
    $ quizdesk page questions.graphql --page-size 20 --page 3
"
)]
pub struct Quizdesk {
    #[command(subcommand)]
    pub command: Command,

    /// Specify quizdesk's log level
    #[arg(long = "log", short = 'l', global = true)]
    pub log_level: Option<Level>,

    /// GraphQL endpoint to send operations to
    #[arg(long, global = true)]
    pub endpoint: Option<Url>,

    #[arg(skip)]
    pub env_store: QuizdeskEnv,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a query
    Query(command::Query),

    /// Run a mutation
    Mutate(command::Mutate),

    /// Fetch a page of a Relay connection
    Page(command::Page),

    /// Sign in and out
    Session(command::Session),

    /// Recently used script files
    Recent(command::Recent),
}

impl Quizdesk {
    pub async fn run(&self) -> QuizdeskResult<QuizdeskOutput> {
        match &self.command {
            Command::Query(command) => command.run(self.get_client()?, &self.get_store()?).await,
            Command::Mutate(command) => command.run(self.get_client()?, &self.get_store()?).await,
            Command::Page(command) => command.run(self.get_client()?, &self.get_store()?).await,
            Command::Session(command) => command.run(&self.get_store()?),
            Command::Recent(command) => command.run(&self.get_store()?),
        }
    }

    pub(crate) fn get_config(&self) -> QuizdeskResult<Config> {
        let override_home: Option<Utf8PathBuf> = self
            .env_store
            .get(QuizdeskEnvKey::ConfigHome)?
            .map(Utf8PathBuf::from);
        Ok(Config::new(override_home.as_ref())?)
    }

    pub(crate) fn get_store(&self) -> QuizdeskResult<Store> {
        Ok(Store::new(&self.get_config()?))
    }

    /// `--endpoint`, then `QUIZDESK_GRAPHQL_URL`, then the local default
    pub(crate) fn get_endpoint(&self) -> QuizdeskResult<Url> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        let key = QuizdeskEnvKey::GraphqlUrl;
        let endpoint = self
            .env_store
            .get(key)?
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Url::parse(&endpoint)
            .map_err(|err| QuizdeskError::new(anyhow!("${key} is not a valid URL: {err}")))
    }

    pub(crate) fn get_timeout(&self) -> QuizdeskResult<Option<Duration>> {
        let key = QuizdeskEnvKey::TimeoutSecs;
        self.env_store
            .get(key)?
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| {
                        QuizdeskError::new(anyhow!("${key} must be a whole number of seconds"))
                    })
            })
            .transpose()
    }

    /// `QUIZDESK_TOKEN` wins over the stored session
    pub(crate) fn get_bearer_token(&self, store: &Store) -> QuizdeskResult<Option<String>> {
        if let Some(token) = self.env_store.get(QuizdeskEnvKey::Token)? {
            return Ok(Some(token));
        }
        Ok(Session::load(store)?.map(|session| session.token))
    }

    pub(crate) fn get_client(&self) -> QuizdeskResult<GraphQLClient> {
        let config = HttpServiceConfig::builder()
            .and_timeout(self.get_timeout()?)
            .build();
        let http_service = ReqwestServiceFactory::from_config(config)?.create()?;
        let factory = GraphQLClientFactory::builder()
            .endpoint(self.get_endpoint()?)
            .http_service(http_service)
            .and_bearer_token(self.get_bearer_token(&self.get_store()?)?)
            .client_name(format!("{PKG_NAME}/{PKG_VERSION}"))
            .build()?;
        Ok(factory.create())
    }
}
