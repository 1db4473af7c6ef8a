//! Graph-store routes: reviewers of a movie, movies rated by a person.

use serde_json::Value;

use crate::support;

#[tokio::test]
async fn reviewers_are_collapsed_for_the_first_matching_movie() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    // "matrix" matches both "The Matrix" and "The Matrix Reloaded"; only the
    // first movie's reviewers may be returned, never a merge of both.
    let resp = client
        .get(format!("{base}/movies/matrix/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["movie"], "The Matrix");
    assert_eq!(body["users_count"], 2);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Jessica Thompson");
    assert_eq!(users[0]["rating"], 65);
    assert_eq!(users[0]["summary"], "An amazing journey");
    assert_eq!(users[1]["name"], "Angela Scope");
}

#[tokio::test]
async fn a_movie_with_zero_reviews_yields_an_empty_list_not_404() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies/reloaded/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["movie"], "The Matrix Reloaded");
    assert_eq!(body["users_count"], 0);
    assert_eq!(body["users"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_movie_is_404() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/movies/zzz/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn rated_movies_collapse_into_a_profile() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/users/jessica"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"], "Jessica Thompson");
    assert_eq!(body["born"], 1968);
    assert_eq!(body["movies_rated_count"], 2);

    let rated = body["rated_movies"].as_array().unwrap();
    assert_eq!(rated.len(), 2);
    assert_eq!(rated[0]["title"], "The Matrix");
    assert_eq!(rated[0]["released"], 1999);
    assert_eq!(rated[0]["rating"], 65);
    assert_eq!(rated[1]["title"], "Inception");
}

#[tokio::test]
async fn a_person_with_zero_reviews_yields_an_empty_profile() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/users/quiet"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["user"], "Quiet Bob");
    assert_eq!(body["movies_rated_count"], 0);
    assert_eq!(body["rated_movies"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_person_is_404() {
    let base = support::serve_default().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/users/nobody"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn graph_store_failure_maps_to_500() {
    let graph = support::review_graph();
    let handle = graph.clone();
    let base = support::serve(support::catalog(), graph).await;
    let client = reqwest::Client::new();

    handle.set_failing(true);
    let resp = client
        .get(format!("{base}/movies/matrix/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}
