//! HTTP surface: axum router, response envelopes, and the single
//! error-kind→status mapping.
//!
//! ## Routes
//!
//! - `GET /` — endpoint listing.
//! - `GET /health` — composite liveness, 200 or 503, never 500.
//! - `GET /movies?page=&limit=` — paged catalog listing.
//! - `GET /movies/search?name=&actor=` — pattern search.
//! - `PUT /movies/:name` — partial update by exact case-insensitive title.
//! - `GET /movies/common` — cross-store reconciliation report.
//! - `GET /movies/:name/users` — reviewers of a movie.
//! - `GET /users/:name` — movies rated by a person.
//!
//! Every failure body is `{"success": false, "error": <message>}`; the
//! status code comes from [`GatewayError::status_code`] in exactly one
//! place.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::store::{DocumentStore, GraphStore};

/// Build the router over a shared gateway.
pub fn router<D, G>(gateway: Arc<Gateway<D, G>>) -> Router
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/movies", get(list_handler))
        .route("/movies/search", get(search_handler))
        .route("/movies/common", get(common_handler))
        .route("/movies/:name", put(update_handler))
        .route("/movies/:name/users", get(reviewers_handler))
        .route("/users/:name", get(rated_handler))
        .with_state(gateway)
}

/// Serve the gateway over HTTP at the given address (e.g. `"0.0.0.0:5000"`).
pub async fn serve<D, G>(gateway: Arc<Gateway<D, G>>, addr: &str) -> Result<(), std::io::Error>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let app = router(gateway);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({ "success": false, "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
struct ListParams {
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    name: Option<String>,
    actor: Option<String>,
}

/// `GET /` — fixed endpoint listing.
async fn index_handler() -> Json<Value> {
    Json(json!({
        "service": "cinegate",
        "endpoints": {
            "GET /movies?page=&limit=": "paged movie listing from the document store",
            "GET /movies/search?name=&actor=": "pattern search by title and/or cast member",
            "PUT /movies/{name}": "partial update by exact case-insensitive title",
            "GET /movies/common": "titles present in both stores",
            "GET /movies/{name}/users": "reviewers of a movie",
            "GET /users/{name}": "movies rated by a person",
            "GET /health": "liveness of both stores",
        }
    }))
}

/// `GET /health` — 200 when both stores answer, 503 otherwise; never 500.
async fn health_handler<D, G>(State(gateway): State<Arc<Gateway<D, G>>>) -> Response
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let health = gateway.health().await;
    let status = if health.healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = json!({
        "mongodb": { "status": health.document.status(), "error": health.document.error },
        "neo4j": { "status": health.graph.status(), "error": health.graph.error },
        "status": health.status(),
    });
    (status, Json(body)).into_response()
}

async fn list_handler<D, G>(
    State(gateway): State<Arc<Gateway<D, G>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, GatewayError>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let page = gateway
        .list_movies(params.page.as_deref(), params.limit.as_deref())
        .await?;
    Ok(Json(json!({
        "success": true,
        "page": page.page,
        "limit": page.limit,
        "total": page.total,
        "count": page.movies.len(),
        "movies": page.movies,
    })))
}

async fn search_handler<D, G>(
    State(gateway): State<Arc<Gateway<D, G>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, GatewayError>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let movies = gateway
        .search_movies(params.name.as_deref(), params.actor.as_deref())
        .await?;
    Ok(Json(json!({
        "success": true,
        "count": movies.len(),
        "movies": movies,
    })))
}

async fn update_handler<D, G>(
    State(gateway): State<Arc<Gateway<D, G>>>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GatewayError>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    // A missing or non-JSON body reaches the object check as null.
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);
    let outcome = gateway.update_movie(&name, body).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("updated movie '{name}'"),
        "modified_count": outcome.modified,
    })))
}

async fn common_handler<D, G>(
    State(gateway): State<Arc<Gateway<D, G>>>,
) -> Result<Json<Value>, GatewayError>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let report = gateway.reconcile().await?;
    Ok(Json(json!({
        "success": true,
        "mongodb_count": report.document_count,
        "neo4j_count": report.graph_count,
        "common_count": report.common_count,
        "common_movies": report.common_titles,
    })))
}

async fn reviewers_handler<D, G>(
    State(gateway): State<Arc<Gateway<D, G>>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GatewayError>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let found = gateway.movie_reviewers(&name).await?;
    Ok(Json(json!({
        "success": true,
        "movie": found.movie,
        "users_count": found.reviewers.len(),
        "users": found.reviewers,
    })))
}

async fn rated_handler<D, G>(
    State(gateway): State<Arc<Gateway<D, G>>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GatewayError>
where
    D: DocumentStore + 'static,
    G: GraphStore + 'static,
{
    let profile = gateway.rated_movies(&name).await?;
    Ok(Json(json!({
        "success": true,
        "user": profile.name,
        "born": profile.born,
        "movies_rated_count": profile.rated_count,
        "rated_movies": profile.rated_movies,
    })))
}
