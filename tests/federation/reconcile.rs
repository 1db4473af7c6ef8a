//! The cross-store reconciliation route.

use serde_json::Value;

use cinegate::store::{MemoryDocumentStore, MemoryGraphStore};

use crate::support;

#[tokio::test]
async fn reports_titles_present_in_both_stores() {
    let documents = MemoryDocumentStore::new(vec![
        support::movie("Inception", 2010, &[]),
        support::movie("The Matrix", 1999, &[]),
    ]);
    let graph = MemoryGraphStore::new(
        vec![
            support::graph_movie("Inception", 2010),
            support::graph_movie("Interstellar", 2014),
        ],
        Vec::new(),
        Vec::new(),
    );
    let base = support::serve(documents, graph).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies/common"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["mongodb_count"], 2);
    assert_eq!(body["neo4j_count"], 2);
    assert_eq!(body["common_count"], 1);
    assert_eq!(body["common_movies"].as_array().unwrap().len(), 1);
    assert_eq!(body["common_movies"][0], "Inception");
}

#[tokio::test]
async fn titles_reconcile_across_casing_differences() {
    let documents = MemoryDocumentStore::new(vec![support::movie("Inception", 2010, &[])]);
    let graph = MemoryGraphStore::new(
        vec![support::graph_movie("INCEPTION", 2010)],
        Vec::new(),
        Vec::new(),
    );
    let base = support::serve(documents, graph).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies/common"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["common_count"], 1);
    // Members carry the document store's casing.
    assert_eq!(body["common_movies"][0], "Inception");
}

#[tokio::test]
async fn common_titles_come_back_sorted() {
    let documents = MemoryDocumentStore::new(vec![
        support::movie("Zodiac", 2007, &[]),
        support::movie("Alien", 1979, &[]),
        support::movie("Memento", 2000, &[]),
    ]);
    let graph = MemoryGraphStore::new(
        vec![
            support::graph_movie("Memento", 2000),
            support::graph_movie("Zodiac", 2007),
            support::graph_movie("Alien", 1979),
        ],
        Vec::new(),
        Vec::new(),
    );
    let base = support::serve(documents, graph).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies/common"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let common: Vec<&str> = body["common_movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|title| title.as_str().unwrap())
        .collect();
    assert_eq!(common, vec!["Alien", "Memento", "Zodiac"]);
}

#[tokio::test]
async fn a_failing_store_aborts_the_whole_report() {
    let documents = support::catalog();
    let handle = documents.clone();
    let base = support::serve(documents, support::review_graph()).await;
    let client = reqwest::Client::new();

    handle.set_failing(true);
    let resp = client
        .get(format!("{base}/movies/common"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}
