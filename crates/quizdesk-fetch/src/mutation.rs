use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use quizdesk_graphql::{GraphQLClient, GraphQLRequest, Script};
use serde_json::Value;
use tokio::sync::{oneshot, watch};
use tower::ServiceExt;

use crate::{query::wait_until_settled, result::interpret, FetchError, MutationBus, QueryResult};

/// A mutation that runs only when [`execute`](Mutation::execute) is called.
///
/// The observable `(data, error, loading)` state follows the most recently
/// started execution. Every caller still receives its own outcome from the
/// returned future.
pub struct Mutation {
    client: GraphQLClient,
    script: Script,
    bus: Option<MutationBus>,
    latest: Arc<AtomicU64>,
    state: Arc<watch::Sender<QueryResult>>,
}

impl Mutation {
    pub fn new(client: GraphQLClient, script: Script) -> Mutation {
        let (state, _) = watch::channel(QueryResult::default());
        Mutation {
            client,
            script,
            bus: None,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Bumps `bus` after each successful execution
    pub fn with_bus(mut self, bus: MutationBus) -> Mutation {
        self.bus = Some(bus);
        self
    }

    pub const fn script(&self) -> &Script {
        &self.script
    }

    /// Sends the mutation.
    ///
    /// The request runs on its own task, so the state leaves loading even if
    /// the returned future is dropped. That future resolves with the response
    /// data, or fails with the first GraphQL error or the transport failure.
    pub fn execute(
        &self,
        variables: Option<Value>,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send + 'static {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(QueryResult::pending());

        let request = GraphQLRequest::new(self.script.clone(), variables);
        let operation = self.script.name().to_string();
        let client = self.client.clone();
        let bus = self.bus.clone();
        let latest = Arc::clone(&self.latest);
        let state = Arc::clone(&self.state);
        tracing::debug!(%operation, seq, "executing mutation");

        let (reply, outcome) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = interpret(client.oneshot(request).await);
            match &outcome {
                Ok(_) => {
                    tracing::debug!(%operation, seq, "mutation succeeded");
                    if let Some(bus) = &bus {
                        bus.bump();
                    }
                }
                Err(error) => tracing::debug!(%operation, seq, %error, "mutation failed"),
            }

            state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != seq {
                    return false;
                }
                *current = QueryResult::from(outcome.clone());
                true
            });

            // the caller may have stopped waiting
            let _ = reply.send(outcome.map(|data| data.unwrap_or(Value::Null)));
        });

        async move { outcome.await.unwrap_or(Err(FetchError::Interrupted)) }
    }

    pub fn result(&self) -> QueryResult {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryResult> {
        self.state.subscribe()
    }

    /// Waits until no execution is outstanding
    pub fn settled(&self) -> impl Future<Output = QueryResult> + Send + 'static {
        wait_until_settled(self.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quizdesk_graphql::Script;
    use rstest::rstest;
    use serde_json::json;
    use speculoos::prelude::*;

    use super::Mutation;
    use crate::{
        test_support::{mock_client, response, settle},
        FetchError, MutationBus,
    };

    fn create_user() -> Script {
        Script::parse(
            "mutation CreateUser($username: String!) { createUser(username: $username) { id } }",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn nothing_runs_until_executed() {
        let (client, _handle) = mock_client();
        let mutation = Mutation::new(client, create_user());
        let (data, error, loading) = mutation.result().into_parts();
        assert_eq!(data, None);
        assert!(error.is_none());
        assert!(!loading);
    }

    #[tokio::test]
    async fn resolves_with_data_and_bumps_the_bus() {
        let (client, mut handle) = mock_client();
        let bus = MutationBus::new();
        let mutation = Mutation::new(client, create_user()).with_bus(bus.clone());

        let pending = tokio::spawn(mutation.execute(Some(json!({ "username": "bob" }))));
        assert!(mutation.result().is_loading());

        let (request, send) = handle.next_request().await.unwrap();
        assert_eq!(request.variables(), Some(&json!({ "username": "bob" })));
        send.send_response(response(json!({ "data": { "createUser": { "id": "7" } } })));

        let data = pending.await.unwrap().unwrap();
        assert_eq!(data, json!({ "createUser": { "id": "7" } }));
        assert_eq!(bus.count(), 1);
        let result = mutation.settled().await;
        assert_eq!(result.data(), &Some(json!({ "createUser": { "id": "7" } })));
    }

    #[tokio::test]
    async fn transport_failures_reject_the_execution() {
        let (client, mut handle) = mock_client();
        let bus = MutationBus::new();
        let mutation = Mutation::new(client, create_user()).with_bus(bus.clone());

        let pending = tokio::spawn(mutation.execute(Some(json!({ "username": "bob" }))));
        let (_, send) = handle.next_request().await.unwrap();
        send.send_error(std::io::Error::other("network down"));

        let outcome = pending.await.unwrap();
        assert_that!(outcome).is_err().matches(|err| {
            matches!(err, FetchError::Transport(_)) && err.to_string().contains("network down")
        });
        assert!(!mutation.result().is_loading());
        assert!(mutation.result().error().is_some());
        assert_eq!(bus.count(), 0);
    }

    #[tokio::test]
    async fn graphql_errors_reject_the_execution() {
        let (client, mut handle) = mock_client();
        let bus = MutationBus::new();
        let mutation = Mutation::new(client, create_user()).with_bus(bus.clone());

        let pending = tokio::spawn(mutation.execute(Some(json!({ "username": "" }))));
        let (_, send) = handle.next_request().await.unwrap();
        send.send_response(response(json!({
            "data": null,
            "errors": [{ "message": "username must not be empty" }]
        })));

        let outcome = pending.await.unwrap();
        assert_that!(outcome)
            .is_err()
            .matches(|err| err.to_string() == "username must not be empty");
        assert_eq!(bus.count(), 0);
    }

    #[tokio::test]
    async fn abandoning_the_execution_still_settles_the_state() {
        let (client, mut handle) = mock_client();
        let bus = MutationBus::new();
        let mutation = Mutation::new(client, create_user()).with_bus(bus.clone());

        drop(mutation.execute(Some(json!({ "username": "bob" }))));
        assert!(mutation.result().is_loading());

        let (_, send) = handle.next_request().await.unwrap();
        send.send_response(response(json!({ "data": { "createUser": { "id": "7" } } })));

        let result = mutation.settled().await;
        assert!(!result.is_loading());
        assert_eq!(result.data(), &Some(json!({ "createUser": { "id": "7" } })));
        assert_eq!(bus.count(), 1);
    }

    #[rstest]
    #[case::newest_answers_first(true)]
    #[case::oldest_answers_first(false)]
    #[tokio::test]
    async fn overlapping_executions_each_get_their_own_outcome(#[case] newest_first: bool) {
        let (client, mut handle) = mock_client();
        let mutation = Mutation::new(client, create_user());

        let first = tokio::spawn(mutation.execute(Some(json!({ "username": "ann" }))));
        let second = tokio::spawn(mutation.execute(Some(json!({ "username": "bob" }))));

        let mut pending = vec![
            handle.next_request().await.unwrap(),
            handle.next_request().await.unwrap(),
        ];
        pending.sort_by_key(|(req, _)| req.variables().map(|v| v["username"].to_string()));
        let (_, bob) = pending.pop().unwrap();
        let (_, ann) = pending.pop().unwrap();

        let ann_reply = response(json!({ "data": { "createUser": { "id": "1" } } }));
        let bob_reply = response(json!({ "data": { "createUser": { "id": "2" } } }));
        if newest_first {
            bob.send_response(bob_reply);
            settle().await;
            ann.send_response(ann_reply);
        } else {
            ann.send_response(ann_reply);
            settle().await;
            assert!(mutation.result().is_loading());
            bob.send_response(bob_reply);
        }

        assert_eq!(first.await.unwrap().unwrap(), json!({ "createUser": { "id": "1" } }));
        assert_eq!(second.await.unwrap().unwrap(), json!({ "createUser": { "id": "2" } }));
        settle().await;

        let (data, error, loading) = mutation.settled().await.into_parts();
        assert_eq!(data, Some(json!({ "createUser": { "id": "2" } })));
        assert!(error.is_none());
        assert!(!loading);
    }
}
