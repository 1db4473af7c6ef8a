//! Domain records shared by the store clients and the gateway.

use serde::{Deserialize, Serialize};

/// A movie as held by the document store, restricted to the projected
/// catalog fields. The store's own identity fields are never exposed.
///
/// `title` is the cross-store identity; a record without one is excluded
/// from reconciliation's candidate set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub cast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A person node in the graph store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPerson {
    pub name: String,
    pub born: Option<i64>,
}

/// A movie node in the graph store. Titles follow the same identity rule as
/// [`MovieRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMovie {
    pub title: String,
    pub released: Option<i64>,
}

/// One person→movie review relationship, referenced by node identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEdge {
    pub person: String,
    pub movie: String,
    pub rating: Option<i64>,
    pub summary: Option<String>,
}

/// One reviewer of a movie, collapsed from a review edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub name: String,
    pub rating: Option<i64>,
    pub summary: Option<String>,
}

/// A movie and everyone who reviewed it. A movie with zero reviewers keeps
/// an empty collection, never a null placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieReviewers {
    pub movie: String,
    pub reviewers: Vec<Reviewer>,
}

/// One movie a person rated, with the edge's rating and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedMovie {
    pub title: String,
    pub released: Option<i64>,
    pub rating: Option<i64>,
    pub summary: Option<String>,
}

/// A person and the full collapse of their outgoing review edges.
/// `rated_count` counts distinct movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaterProfile {
    pub name: String,
    pub born: Option<i64>,
    pub rated_count: i64,
    pub rated_movies: Vec<RatedMovie>,
}

/// Result of an update: how many records the filter matched versus how many
/// actually changed. "Matched but unchanged" is a successful no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}
