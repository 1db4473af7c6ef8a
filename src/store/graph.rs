//! Graph-store client backed by Neo4j.
//!
//! Each operation runs one parameterized traversal and collapses its
//! one-to-many fan-out into the nested collections the gateway serves.

use std::collections::HashSet;

use async_trait::async_trait;
use neo4rs::{query, Graph};
use serde::Deserialize;
use tracing::info;

use super::{GraphStore, StoreError};
use crate::config::GatewayConfig;
use crate::model::{MovieReviewers, RatedMovie, RaterProfile, Reviewer};
use crate::normalize;

/// Client for the person→REVIEWED→movie graph.
pub struct Neo4jReviewStore {
    graph: Graph,
}

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// One aggregated edge entry from the reviewer traversal. A movie that
/// matched with zero review edges still yields a single entry, carrying a
/// null name; it must be filtered, never surfaced as a pseudo-user.
#[derive(Deserialize)]
struct ReviewerEntry {
    name: Option<String>,
    rating: Option<i64>,
    summary: Option<String>,
}

/// One aggregated edge entry from the rated-movies traversal; the null-title
/// entry is the zero-edge placeholder.
#[derive(Deserialize)]
struct RatedEntry {
    title: Option<String>,
    released: Option<i64>,
    rating: Option<i64>,
    summary: Option<String>,
}

impl Neo4jReviewStore {
    /// Connect with the configured bolt URI and credentials.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, StoreError> {
        let graph = Graph::new(
            config.neo4j_uri.as_str(),
            config.neo4j_user.as_str(),
            config.neo4j_password.as_str(),
        )
        .await
        .map_err(|e| StoreError::Connect(e.to_string()))?;
        info!(uri = %config.neo4j_uri, "connected to graph store");
        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for Neo4jReviewStore {
    async fn reviewers_of(
        &self,
        title_fragment: &str,
    ) -> Result<Option<MovieReviewers>, StoreError> {
        // The edge leg is optional so a movie with zero reviews still
        // matches; only the first matching movie is aggregated.
        let q = query(
            "MATCH (m:Movie) WHERE m.title =~ $pattern \
             OPTIONAL MATCH (p:Person)-[r:REVIEWED]->(m) \
             RETURN m.title AS movie, \
                    collect({name: p.name, rating: r.rating, summary: r.summary}) AS reviewers \
             LIMIT 1",
        )
        .param("pattern", normalize::graph_substring(title_fragment));

        let mut stream = self.graph.execute(q).await?;
        let row = match stream.next().await? {
            Some(row) => row,
            None => return Ok(None),
        };
        let movie: String = row
            .get("movie")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let entries: Vec<ReviewerEntry> = row
            .get("reviewers")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let reviewers = entries
            .into_iter()
            .filter_map(|entry| {
                entry.name.map(|name| Reviewer {
                    name,
                    rating: entry.rating,
                    summary: entry.summary,
                })
            })
            .collect();
        Ok(Some(MovieReviewers { movie, reviewers }))
    }

    async fn movies_rated_by(
        &self,
        name_fragment: &str,
    ) -> Result<Option<RaterProfile>, StoreError> {
        let q = query(
            "MATCH (p:Person) WHERE p.name =~ $pattern \
             OPTIONAL MATCH (p)-[r:REVIEWED]->(m:Movie) \
             RETURN p.name AS name, p.born AS born, \
                    count(DISTINCT m) AS rated_count, \
                    collect({title: m.title, released: m.released, \
                             rating: r.rating, summary: r.summary}) AS rated \
             LIMIT 1",
        )
        .param("pattern", normalize::graph_substring(name_fragment));

        let mut stream = self.graph.execute(q).await?;
        let row = match stream.next().await? {
            Some(row) => row,
            None => return Ok(None),
        };
        let name: String = row
            .get("name")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let born: Option<i64> = row
            .get("born")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let rated_count: i64 = row
            .get("rated_count")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let entries: Vec<RatedEntry> = row
            .get("rated")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let rated_movies = entries
            .into_iter()
            .filter_map(|entry| {
                entry.title.map(|title| RatedMovie {
                    title,
                    released: entry.released,
                    rating: entry.rating,
                    summary: entry.summary,
                })
            })
            .collect();
        Ok(Some(RaterProfile {
            name,
            born,
            rated_count,
            rated_movies,
        }))
    }

    async fn sample_titles(&self, cap: usize) -> Result<HashSet<String>, StoreError> {
        let q = query(
            "MATCH (m:Movie) WHERE m.title IS NOT NULL \
             RETURN DISTINCT m.title AS title LIMIT $cap",
        )
        .param("cap", cap as i64);

        let mut stream = self.graph.execute(q).await?;
        let mut titles = HashSet::new();
        while let Some(row) = stream.next().await? {
            let title: String = row
                .get("title")
                .map_err(|e| StoreError::Query(e.to_string()))?;
            titles.insert(title);
        }
        Ok(titles)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.graph.run(query("RETURN 1")).await?;
        Ok(())
    }
}
