use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use quizdesk_graphql::{GraphQLClient, GraphQLRequest, Script};
use serde_json::Value;
use tokio::{sync::watch, task::AbortHandle};
use tower::ServiceExt;

use crate::{result::interpret, MutationBus, QueryResult};

/// A query that refetches whenever its script or variables change.
///
/// Requests are never cancelled. Each one is numbered as it is issued, and a
/// response is applied only while its number is still the latest, so a slow
/// answer to an old request can never overwrite a newer one.
///
/// Issuing spawns onto the current tokio runtime; constructing or updating a
/// query with a script outside of one panics.
pub struct Query {
    client: GraphQLClient,
    shared: Arc<Shared>,
    refetch: Option<AbortHandle>,
}

struct Shared {
    inputs: Mutex<Inputs>,
    latest: AtomicU64,
    state: watch::Sender<QueryResult>,
}

impl Query {
    /// Creates the query and, when a script is given, issues the first request.
    ///
    /// Without a script nothing is fetched, which lets callers wait until they
    /// know what to ask for; `variables` are kept and sent with the first script.
    pub fn new(client: GraphQLClient, script: Option<Script>, variables: Option<Value>) -> Query {
        let (state, _) = watch::channel(QueryResult::default());
        let query = Query {
            client,
            shared: Arc::new(Shared {
                inputs: Mutex::new(Inputs::default()),
                latest: AtomicU64::new(0),
                state,
            }),
            refetch: None,
        };
        query.replace(script, variables);
        query
    }

    /// Refetches every time `bus` records a successful mutation, for as long as this query lives
    pub fn refetch_on(mut self, bus: &MutationBus) -> Query {
        let mut mutations = bus.subscribe();
        let shared = Arc::clone(&self.shared);
        let client = self.client.clone();
        let listener = tokio::spawn(async move {
            while mutations.changed().await.is_ok() {
                let count = *mutations.borrow_and_update();
                tracing::debug!(count, "mutation observed, refetching");
                shared.issue(&client);
            }
        });
        if let Some(previous) = self.refetch.replace(listener.abort_handle()) {
            previous.abort();
        }
        self
    }

    /// Replaces both script and variables, refetching if either changed
    pub fn set(&mut self, script: Option<Script>, variables: Option<Value>) {
        self.replace(script, variables);
    }

    pub fn set_script(&mut self, script: Option<Script>) {
        let variables = self.shared.inputs().variables;
        self.replace(script, variables);
    }

    /// Replaces the variables; without a script they are kept for the first request
    pub fn set_variables(&mut self, variables: Option<Value>) {
        let script = self.shared.inputs().script;
        self.replace(script, variables);
    }

    /// Issues the current request again without changing anything
    pub fn retry(&self) {
        self.shared.issue(&self.client);
    }

    pub fn result(&self) -> QueryResult {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryResult> {
        self.shared.state.subscribe()
    }

    /// Waits until no request is outstanding and returns the state at that point
    pub fn settled(&self) -> impl Future<Output = QueryResult> + Send + 'static {
        wait_until_settled(self.subscribe())
    }

    fn replace(&self, script: Option<Script>, variables: Option<Value>) {
        let next = Inputs { script, variables };
        {
            let mut inputs = self
                .shared
                .inputs
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *inputs == next && self.shared.latest.load(Ordering::SeqCst) > 0 {
                return;
            }
            *inputs = next;
        }
        self.shared.issue(&self.client);
    }
}

/// What the query was last told to fetch; variables survive while the script is absent
#[derive(Clone, Debug, Default, PartialEq)]
struct Inputs {
    script: Option<Script>,
    variables: Option<Value>,
}

impl Inputs {
    fn request(&self) -> Option<GraphQLRequest> {
        let script = self.script.clone()?;
        Some(GraphQLRequest::new(script, self.variables.clone()))
    }
}

impl Shared {
    fn inputs(&self) -> Inputs {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn issue(self: &Arc<Self>, client: &GraphQLClient) {
        // numbering under the lock keeps the number and the request it names in step
        let (request, seq) = {
            let inputs = self.inputs.lock().unwrap_or_else(PoisonError::into_inner);
            let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            (inputs.request(), seq)
        };

        let Some(request) = request else {
            tracing::trace!(seq, "no script, clearing query state");
            self.state.send_replace(QueryResult::default());
            return;
        };

        self.state.send_replace(QueryResult::pending());
        let operation = request.script().name().to_string();
        tracing::debug!(%operation, seq, "issuing query");

        let shared = Arc::clone(self);
        let client = client.clone();
        tokio::spawn(async move {
            let outcome = interpret(client.oneshot(request).await);
            shared.state.send_if_modified(|state| {
                if shared.latest.load(Ordering::SeqCst) != seq {
                    tracing::debug!(%operation, seq, "discarding superseded response");
                    return false;
                }
                if let Err(error) = &outcome {
                    tracing::debug!(%operation, seq, %error, "query failed");
                } else {
                    tracing::debug!(%operation, seq, "query settled");
                }
                *state = QueryResult::from(outcome);
                true
            });
        });
    }
}

pub(crate) async fn wait_until_settled(mut receiver: watch::Receiver<QueryResult>) -> QueryResult {
    let settled = receiver
        .wait_for(|result| !result.is_loading())
        .await
        .map(|result| result.clone());
    // a closed channel means the last value is final
    settled.unwrap_or_else(|_| receiver.borrow().clone())
}

impl Drop for Query {
    fn drop(&mut self) {
        if let Some(listener) = self.refetch.take() {
            listener.abort();
        }
    }
}
