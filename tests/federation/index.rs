//! The documentation index route.

use serde_json::Value;

use crate::support;

#[tokio::test]
async fn index_lists_every_endpoint() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["service"], "cinegate");

    let endpoints = body["endpoints"].as_object().unwrap();
    assert!(endpoints.contains_key("GET /movies/common"));
    assert!(endpoints.contains_key("GET /health"));
    assert!(endpoints.len() >= 7);
}
