use assert_fs::TempDir;
use httpmock::{Method::POST, MockServer};
use predicates::prelude::*;
use serde_json::{json, Value};

use super::{quizdesk, script};

const QUESTIONS: &str = "query Questions($first: Int, $after: String, $last: Int, $before: String, $skipPages: Int) { questions(first: $first, after: $after, last: $last, before: $before, skipPages: $skipPages) { edges { cursor node { id } } pageInfo { startCursor endCursor hasPreviousPage hasNextPage } } }";

fn page(ids: [&str; 2], has_previous_page: bool) -> Value {
    json!({
        "data": {
            "questions": {
                "edges": [
                    { "cursor": format!("c{}", ids[0]), "node": { "id": ids[0] } },
                    { "cursor": format!("c{}", ids[1]), "node": { "id": ids[1] } }
                ],
                "pageInfo": {
                    "startCursor": format!("c{}", ids[0]),
                    "endCursor": format!("c{}", ids[1]),
                    "hasPreviousPage": has_previous_page,
                    "hasNextPage": true
                }
            }
        }
    })
}

#[test]
fn it_jumps_to_a_page_with_skip_pages() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .json_body(json!({ "query": QUESTIONS, "variables": { "first": 2 } }));
        then.status(200).json_body(page(["1", "2"], false));
    });
    let third = server.mock(|when, then| {
        when.method(POST).path("/graphql").json_body(json!({
            "query": QUESTIONS,
            "variables": { "first": 2, "after": "c2", "skipPages": 1 }
        }));
        then.status(200).json_body(page(["5", "6"], true));
    });
    let file = script(&home, "questions.graphql", QUESTIONS);

    quizdesk(&home)
        .args(["--endpoint", &server.url("/graphql")])
        .args(["page", &file, "--page-size", "2", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""page": 2"#))
        .stdout(predicate::str::contains(r#""id": "5""#))
        .stdout(predicate::str::contains(r#""endCursor": "c6""#));
    first.assert();
    third.assert();
}

#[test]
fn it_rejects_non_object_variables() {
    let home = TempDir::new().unwrap();
    let file = script(&home, "questions.graphql", QUESTIONS);

    quizdesk(&home)
        .args(["--endpoint", "http://127.0.0.1:9/graphql"])
        .args(["page", &file, "--page-size", "2", "--variables", "[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}
