//! The federation boundary: validation, backend selection, orchestration.
//!
//! `Gateway` is generic over its injected stores: constructed once at
//! startup, passed in explicitly, never reached through a global. It owns no
//! store-specific logic; it validates input, picks the backend combination,
//! wraps every store call in the operation timeout, and shapes typed
//! results.

use std::time::Duration;

use serde_json::Value;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::health::{self, CompositeHealth};
use crate::model::{MovieRecord, MovieReviewers, RaterProfile, UpdateOutcome};
use crate::reconcile::{self, ReconciliationReport};
use crate::store::{bounded, DocumentStore, GraphStore};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 20;

/// One page of the document-store listing.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub movies: Vec<MovieRecord>,
}

pub struct Gateway<D, G> {
    documents: D,
    graph: G,
    sample_cap: usize,
    op_timeout: Duration,
}

impl<D, G> Gateway<D, G>
where
    D: DocumentStore,
    G: GraphStore,
{
    pub fn new(documents: D, graph: G, config: &GatewayConfig) -> Self {
        Self {
            documents,
            graph,
            sample_cap: config.sample_cap,
            op_timeout: config.operation_timeout(),
        }
    }

    /// Paged listing. Absent parameters fall back to page 1 / limit 20;
    /// present ones must parse to integers ≥ 1.
    pub async fn list_movies(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<MoviePage, GatewayError> {
        let page = parse_positive("page", page, DEFAULT_PAGE)?;
        let limit = parse_positive("limit", limit, DEFAULT_LIMIT)?;
        let skip = (page - 1) * limit;
        let (movies, total) = bounded(
            "movie listing",
            self.op_timeout,
            self.documents.list_page(skip, limit as i64),
        )
        .await?;
        Ok(MoviePage {
            page,
            limit,
            total,
            movies,
        })
    }

    /// Pattern search over title and/or cast. At least one fragment must be
    /// given; a present-but-empty parameter counts as absent.
    pub async fn search_movies(
        &self,
        name: Option<&str>,
        actor: Option<&str>,
    ) -> Result<Vec<MovieRecord>, GatewayError> {
        let name = non_empty(name);
        let actor = non_empty(actor);
        if name.is_none() && actor.is_none() {
            return Err(GatewayError::Validation(
                "at least one of 'name' or 'actor' is required".to_string(),
            ));
        }
        let movies = bounded(
            "movie search",
            self.op_timeout,
            self.documents.search(name, actor),
        )
        .await?;
        Ok(movies)
    }

    /// Partial update by exact case-insensitive title. The identity field is
    /// stripped before the merge so it can never be rewritten; a body with
    /// nothing left to set is invalid.
    pub async fn update_movie(
        &self,
        title: &str,
        body: Value,
    ) -> Result<UpdateOutcome, GatewayError> {
        let mut fields = match body {
            Value::Object(fields) => fields,
            _ => {
                return Err(GatewayError::Validation(
                    "update body must be a JSON object".to_string(),
                ))
            }
        };
        fields.remove("title");
        if fields.is_empty() {
            return Err(GatewayError::Validation(
                "update body contains no updatable fields".to_string(),
            ));
        }
        let outcome = bounded(
            "movie update",
            self.op_timeout,
            self.documents.update_by_title(title, &fields),
        )
        .await?;
        if outcome.matched == 0 {
            return Err(GatewayError::NotFound(format!(
                "no movie titled '{title}' in the document store"
            )));
        }
        Ok(outcome)
    }

    /// All reviewers of the first movie whose title contains `fragment`.
    pub async fn movie_reviewers(&self, fragment: &str) -> Result<MovieReviewers, GatewayError> {
        require_fragment("movie name", fragment)?;
        let found = bounded(
            "reviewer traversal",
            self.op_timeout,
            self.graph.reviewers_of(fragment),
        )
        .await?;
        found.ok_or_else(|| {
            GatewayError::NotFound(format!("no movie matching '{fragment}' in the graph store"))
        })
    }

    /// The rated-movie collapse for the first person whose name contains
    /// `fragment`.
    pub async fn rated_movies(&self, fragment: &str) -> Result<RaterProfile, GatewayError> {
        require_fragment("user name", fragment)?;
        let found = bounded(
            "rating traversal",
            self.op_timeout,
            self.graph.movies_rated_by(fragment),
        )
        .await?;
        found.ok_or_else(|| {
            GatewayError::NotFound(format!("no person matching '{fragment}' in the graph store"))
        })
    }

    /// Sampled title reconciliation across both stores.
    pub async fn reconcile(&self) -> Result<ReconciliationReport, GatewayError> {
        let report =
            reconcile::reconcile(&self.documents, &self.graph, self.sample_cap, self.op_timeout)
                .await?;
        Ok(report)
    }

    /// Composite liveness; never fails.
    pub async fn health(&self) -> CompositeHealth {
        health::probe(&self.documents, &self.graph, self.op_timeout).await
    }
}

fn non_empty(fragment: Option<&str>) -> Option<&str> {
    fragment.filter(|f| !f.trim().is_empty())
}

fn require_fragment(what: &str, fragment: &str) -> Result<(), GatewayError> {
    if fragment.trim().is_empty() {
        return Err(GatewayError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

fn parse_positive(name: &str, raw: Option<&str>, default: u64) -> Result<u64, GatewayError> {
    let raw = match raw {
        Some(raw) => raw,
        None => return Ok(default),
    };
    match raw.parse::<u64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(GatewayError::Validation(format!(
            "'{name}' must be an integer >= 1"
        ))),
    }
}
