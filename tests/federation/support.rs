//! Shared fixtures: seeded stores and a served router.

use std::sync::Arc;

use cinegate::config::GatewayConfig;
use cinegate::gateway::Gateway;
use cinegate::http;
use cinegate::model::{GraphMovie, GraphPerson, MovieRecord, ReviewEdge};
use cinegate::store::{MemoryDocumentStore, MemoryGraphStore};

pub fn movie(title: &str, year: i32, cast: &[&str]) -> MovieRecord {
    MovieRecord {
        title: Some(title.to_string()),
        year: Some(year),
        genres: vec!["Drama".to_string()],
        directors: Vec::new(),
        cast: cast.iter().map(|member| member.to_string()).collect(),
        plot: None,
        rating: None,
    }
}

pub fn graph_movie(title: &str, released: i64) -> GraphMovie {
    GraphMovie {
        title: title.to_string(),
        released: Some(released),
    }
}

pub fn person(name: &str, born: Option<i64>) -> GraphPerson {
    GraphPerson {
        name: name.to_string(),
        born,
    }
}

pub fn review(person: &str, movie: &str, rating: i64, summary: Option<&str>) -> ReviewEdge {
    ReviewEdge {
        person: person.to_string(),
        movie: movie.to_string(),
        rating: Some(rating),
        summary: summary.map(|s| s.to_string()),
    }
}

/// The default catalog: three movies in insertion order.
pub fn catalog() -> MemoryDocumentStore {
    MemoryDocumentStore::new(vec![
        movie("Inception", 2010, &["Leonardo DiCaprio", "Elliot Page"]),
        movie("The Matrix", 1999, &["Keanu Reeves", "Carrie-Anne Moss"]),
        movie("Interstellar", 2014, &["Matthew McConaughey"]),
    ])
}

/// The default review graph: two reviewed movies, one movie with zero
/// edges, one person with zero edges.
pub fn review_graph() -> MemoryGraphStore {
    MemoryGraphStore::new(
        vec![
            graph_movie("The Matrix", 1999),
            graph_movie("The Matrix Reloaded", 2003),
            graph_movie("Inception", 2010),
        ],
        vec![
            person("Jessica Thompson", Some(1968)),
            person("Angela Scope", None),
            person("Quiet Bob", Some(1990)),
        ],
        vec![
            review(
                "Jessica Thompson",
                "The Matrix",
                65,
                Some("An amazing journey"),
            ),
            review("Angela Scope", "The Matrix", 62, None),
            review("Jessica Thompson", "Inception", 95, Some("Dreamy")),
        ],
    )
}

/// Bind to port 0, serve the router, and return the base URL.
pub async fn serve(documents: MemoryDocumentStore, graph: MemoryGraphStore) -> String {
    let gateway = Arc::new(Gateway::new(documents, graph, &GatewayConfig::default()));
    let app = http::router(gateway);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn serve_default() -> String {
    serve(catalog(), review_graph()).await
}
