//! Cross-store reconciliation: which titles exist in both datasets.
//!
//! Best-effort and read-only. The two stores share no transaction boundary,
//! so the samples may reflect different points in time; the report says what
//! overlapped in the two snapshots it saw, nothing stronger.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Duration;

use tracing::info;

use crate::normalize;
use crate::store::{bounded, DocumentStore, GraphStore, StoreError};

/// Default per-store sampling bound.
pub const DEFAULT_SAMPLE_CAP: usize = 1000;

/// A sampled view of title overlap between the two stores. Derived per
/// request; never cached or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Distinct identity keys sampled from the document store.
    pub document_count: usize,
    /// Distinct identity keys sampled from the graph store.
    pub graph_count: usize,
    pub common_count: usize,
    /// Intersection members in the document store's stored casing, sorted
    /// ascending.
    pub common_titles: Vec<String>,
}

impl ReconciliationReport {
    /// The pure set core: re-key both samples by the shared identity key and
    /// intersect. When one key has several display variants, the
    /// lexicographically smallest wins, keeping the output deterministic.
    pub fn from_samples(
        document_titles: HashSet<String>,
        graph_titles: HashSet<String>,
    ) -> Self {
        let mut documents: BTreeMap<String, String> = BTreeMap::new();
        let mut display: Vec<String> = document_titles.into_iter().collect();
        display.sort();
        for title in display {
            documents
                .entry(normalize::identity_key(&title))
                .or_insert(title);
        }

        let graph: BTreeSet<String> = graph_titles
            .iter()
            .map(|title| normalize::identity_key(title))
            .collect();

        let mut common_titles: Vec<String> = documents
            .iter()
            .filter(|(key, _)| graph.contains(key.as_str()))
            .map(|(_, title)| title.clone())
            .collect();
        common_titles.sort();

        ReconciliationReport {
            document_count: documents.len(),
            graph_count: graph.len(),
            common_count: common_titles.len(),
            common_titles,
        }
    }
}

/// Sample up to `cap` titles from each store and intersect.
///
/// The fetches are independent and run concurrently; nothing depends on
/// their ordering. A failure from either store aborts the whole
/// reconciliation — a half report would claim zero overlap it never checked.
pub async fn reconcile<D, G>(
    documents: &D,
    graph: &G,
    cap: usize,
    timeout: Duration,
) -> Result<ReconciliationReport, StoreError>
where
    D: DocumentStore,
    G: GraphStore,
{
    let (document_titles, graph_titles) = tokio::join!(
        bounded("document title sample", timeout, documents.sample_titles(cap)),
        bounded("graph title sample", timeout, graph.sample_titles(cap)),
    );
    let report = ReconciliationReport::from_samples(document_titles?, graph_titles?);
    info!(
        document_count = report.document_count,
        graph_count = report.graph_count,
        common_count = report.common_count,
        "reconciled title samples"
    );
    Ok(report)
}
