//! cinegate — a federated read/write façade over a document-store movie
//! catalog and a graph-store review network.
//!
//! One HTTP surface hides both backends: the document store answers catalog
//! listing, search, and partial updates; the graph store answers
//! who-reviewed-what and who-rated-what; reconciliation reports which titles
//! exist in both under a sampling bound. The stores sit behind the
//! [`DocumentStore`]/[`GraphStore`] traits and are injected into the
//! [`Gateway`] at construction, so the in-memory implementations stand in
//! for the real drivers in tests.

pub mod config;
pub mod error;
pub mod gateway;
pub mod health;
pub mod http;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod store;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::{Gateway, MoviePage};
pub use health::{CompositeHealth, StoreHealth};
pub use model::{
    GraphMovie, GraphPerson, MovieRecord, MovieReviewers, RatedMovie, RaterProfile, ReviewEdge,
    Reviewer, UpdateOutcome,
};
pub use reconcile::ReconciliationReport;
pub use store::{
    DocumentStore, GraphStore, MemoryDocumentStore, MemoryGraphStore, MongoMovieStore,
    Neo4jReviewStore, StoreError,
};
