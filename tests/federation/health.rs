//! The composite health route: per-store isolation, 200/503, never 500.

use serde_json::Value;

use crate::support;

#[tokio::test]
async fn healthy_when_both_stores_answer() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mongodb"]["status"], "connected");
    assert_eq!(body["mongodb"]["error"], Value::Null);
    assert_eq!(body["neo4j"]["status"], "connected");
    assert_eq!(body["neo4j"]["error"], Value::Null);
}

#[tokio::test]
async fn one_failing_store_never_hides_the_other() {
    let documents = support::catalog();
    let handle = documents.clone();
    let base = support::serve(documents, support::review_graph()).await;
    let client = reqwest::Client::new();

    handle.set_failing(true);
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 503);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["mongodb"]["status"], "disconnected");
    assert!(body["mongodb"]["error"].as_str().unwrap().len() > 0);
    // The graph store's sub-result is untouched by the document outage.
    assert_eq!(body["neo4j"]["status"], "connected");
    assert_eq!(body["neo4j"]["error"], Value::Null);
}

#[tokio::test]
async fn degraded_when_both_stores_are_down() {
    let documents = support::catalog();
    let graph = support::review_graph();
    let document_handle = documents.clone();
    let graph_handle = graph.clone();
    let base = support::serve(documents, graph).await;
    let client = reqwest::Client::new();

    document_handle.set_failing(true);
    graph_handle.set_failing(true);
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 503);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["mongodb"]["status"], "disconnected");
    assert_eq!(body["neo4j"]["status"], "disconnected");
}

#[tokio::test]
async fn recovery_flips_back_to_healthy() {
    let documents = support::catalog();
    let handle = documents.clone();
    let base = support::serve(documents, support::review_graph()).await;
    let client = reqwest::Client::new();

    handle.set_failing(true);
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 503);

    handle.set_failing(false);
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
