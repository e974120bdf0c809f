//! Paginator contract tests against a mock Graph server

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aw_graph::{fetch_all_pages, GraphError};

fn ids(records: &[serde_json::Value]) -> Vec<&str> {
    records.iter().filter_map(|r| r["id"].as_str()).collect()
}

#[tokio::test]
async fn follows_next_link_until_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "1"}, {"id": "2"}],
            "@odata.nextLink": format!("{}/page2", server.uri()),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "3"}],
            "@odata.nextLink": format!("{}/page3", server.uri()),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "4"}],
        })))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let records = fetch_all_pages(
        &client,
        &format!("{}/messages", server.uri()),
        "test-token",
        &[],
    )
    .await
    .unwrap();

    assert_eq!(ids(&records), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn first_page_query_not_resent_on_continuation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("$top", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "1"}],
            "@odata.nextLink": format!("{}/page2", server.uri()),
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The continuation request must arrive without the first-page params.
    Mock::given(method("GET"))
        .and(path("/page2"))
        .and(query_param_is_missing("$top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "2"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let records = fetch_all_pages(
        &client,
        &format!("{}/messages", server.uri()),
        "test-token",
        &[("$top", "50".to_string())],
    )
    .await
    .unwrap();

    assert_eq!(ids(&records), vec!["1", "2"]);
}

#[tokio::test]
async fn missing_value_field_yields_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let records = fetch_all_pages(
        &client,
        &format!("{}/messages", server.uri()),
        "test-token",
        &[],
    )
    .await
    .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn non_success_status_aborts_with_no_partial_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "1"}],
            "@odata.nextLink": format!("{}/page2", server.uri()),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": "Forbidden", "message": "Missing scope"}
            })),
        )
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = fetch_all_pages(
        &client,
        &format!("{}/messages", server.uri()),
        "test-token",
        &[],
    )
    .await;

    match result {
        Err(GraphError::Transport { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("Forbidden"));
        }
        other => panic!("expected transport error, got {:?}", other.map(|r| r.len())),
    }
}
