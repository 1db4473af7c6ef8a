//! The store seam: the traits the gateway depends on, the transport error
//! type, and the per-operation timeout guard.
//!
//! Each backend implements one trait; the gateway is generic over both and
//! never touches a driver type. The in-memory implementations satisfy the
//! same contracts for tests.

mod document;
mod graph;
mod memory;

pub use document::MongoMovieStore;
pub use graph::Neo4jReviewStore;
pub use memory::{MemoryDocumentStore, MemoryGraphStore};

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::model::{MovieRecord, MovieReviewers, RaterProfile, UpdateOutcome};

/// Maximum records a search may return. A hard cap, not a first page.
pub const SEARCH_CAP: i64 = 50;

/// Transport-level failure against either backend.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Could not establish a connection.
    Connect(String),
    /// A query failed; the message is the driver's, verbatim.
    Query(String),
    /// The operation exceeded the configured time limit.
    Timeout {
        operation: &'static str,
        limit: Duration,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connect(message) => write!(f, "{}", message),
            StoreError::Query(message) => write!(f, "{}", message),
            StoreError::Timeout { operation, limit } => {
                write!(f, "{} timed out after {:?}", operation, limit)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Read/write operations against the document-store movie catalog.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// One page in the store's natural order plus the total record count.
    /// The two reads are independent; no snapshot isolation between them.
    async fn list_page(&self, skip: u64, limit: i64)
        -> Result<(Vec<MovieRecord>, u64), StoreError>;

    /// Conjunctive pattern search over title and/or cast, capped at
    /// [`SEARCH_CAP`]. Absent fragments impose no constraint.
    async fn search(
        &self,
        title_fragment: Option<&str>,
        cast_fragment: Option<&str>,
    ) -> Result<Vec<MovieRecord>, StoreError>;

    /// Partial merge into every record whose full title equals `title`
    /// ignoring case. The caller has already stripped the identity field.
    async fn update_by_title(
        &self,
        title: &str,
        fields: &Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Up to `cap` records' titles, null titles discarded, deduplicated.
    async fn sample_titles(&self, cap: usize) -> Result<HashSet<String>, StoreError>;

    /// Minimal liveness round-trip.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Traversal operations against the graph-store review network.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Every reviewer of the first movie whose title matches the fragment,
    /// or `None` when no movie node matches at all. Zero reviewers is a
    /// successful empty collection.
    async fn reviewers_of(&self, title_fragment: &str)
        -> Result<Option<MovieReviewers>, StoreError>;

    /// The rated-movie collapse for the first person whose name matches the
    /// fragment, or `None` when no person node matches.
    async fn movies_rated_by(&self, name_fragment: &str)
        -> Result<Option<RaterProfile>, StoreError>;

    /// Up to `cap` distinct non-null movie titles.
    async fn sample_titles(&self, cap: usize) -> Result<HashSet<String>, StoreError>;

    /// Minimal liveness round-trip; failure carries the transport error.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Run a store operation under a time limit.
///
/// The underlying drivers apply their own transport defaults; this guard
/// puts an explicit ceiling on every logical operation so a slow traversal
/// cannot hold a request open indefinitely. Expiry drops the operation's
/// future; there is no cancellation propagation beyond that and no retry.
pub async fn bounded<T, F>(operation: &'static str, limit: Duration, op: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout { operation, limit }),
    }
}
