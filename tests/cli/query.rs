use assert_fs::TempDir;
use httpmock::{Method::POST, MockServer};
use predicates::prelude::*;
use serde_json::json;

use super::{quizdesk, script};

const GET_USER: &str = "query GetUser($id: ID!) { user(id: $id) { id username } }";

#[test]
fn it_prints_query_data() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .header("authorization", "Bearer env-token")
            .header("user-agent", concat!("quizdesk/", env!("CARGO_PKG_VERSION")))
            .json_body(json!({ "query": GET_USER, "variables": { "id": "1" } }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "data": { "user": { "id": "1", "username": "ada" } } }));
    });
    let file = script(&home, "get-user.graphql", GET_USER);

    quizdesk(&home)
        .env("QUIZDESK_TOKEN", "env-token")
        .args(["--endpoint", &server.url("/graphql")])
        .args(["query", &file, "--variables", r#"{"id": "1"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""username": "ada""#));
    mock.assert();

    quizdesk(&home)
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("get-user.graphql"));
}

#[test]
fn it_reports_the_first_graphql_error() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(json!({
            "data": null,
            "errors": [{ "message": "Not authorised" }, { "message": "Also bad" }]
        }));
    });
    let file = script(&home, "get-user.graphql", GET_USER);

    quizdesk(&home)
        .env("QUIZDESK_GRAPHQL_URL", server.url("/graphql"))
        .args(["query", &file, "--variables", r#"{"id": "1"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: Not authorised"));
}

#[test]
fn it_spreads_fragments_into_the_query() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/graphql").json_body(json!({
            "query": "query Me { me { ...on User { id username } } }"
        }));
        then.status(200).json_body(json!({ "data": { "me": { "id": "7" } } }));
    });
    let fragment = script(&home, "user.graphql", "fragment UserFields on User { id username }");
    let file = script(&home, "me.graphql", "query Me { me { ...${UserFields} } }");

    quizdesk(&home)
        .args(["--endpoint", &server.url("/graphql")])
        .args(["query", &file, "--fragment", &fragment])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "7""#));
    mock.assert();
}

#[test]
fn it_refuses_to_run_a_mutation_as_a_query() {
    let home = TempDir::new().unwrap();
    let file = script(&home, "logout.graphql", "mutation Logout { logout }");

    quizdesk(&home)
        .args(["--endpoint", "http://127.0.0.1:9/graphql"])
        .args(["query", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a query"));
}

#[test]
fn it_runs_mutations() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .json_body_includes(r#"{ "variables": { "title": "Capitals" } }"#);
        then.status(200)
            .json_body(json!({ "data": { "createQuiz": { "id": "q1" } } }));
    });
    let file = script(
        &home,
        "create.graphql",
        "mutation CreateQuiz($title: String!) { createQuiz(title: $title) { id } }",
    );

    quizdesk(&home)
        .args(["--endpoint", &server.url("/graphql")])
        .args(["mutate", &file, "--variables", r#"{"title": "Capitals"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "q1""#));
    mock.assert();
}
