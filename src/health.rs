//! Composite liveness over both stores with per-store fault isolation.

use std::time::Duration;

use tracing::warn;

use crate::store::{bounded, DocumentStore, GraphStore, StoreError};

/// Liveness of a single store.
#[derive(Debug, Clone)]
pub struct StoreHealth {
    pub connected: bool,
    pub error: Option<String>,
}

impl StoreHealth {
    fn from_ping(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => StoreHealth {
                connected: true,
                error: None,
            },
            Err(err) => StoreHealth {
                connected: false,
                error: Some(err.to_string()),
            },
        }
    }

    /// Wire value for this sub-result's status field.
    pub fn status(&self) -> &'static str {
        if self.connected {
            "connected"
        } else {
            "disconnected"
        }
    }
}

/// Both sub-results, combined with AND: healthy only when both stores are
/// reachable.
#[derive(Debug, Clone)]
pub struct CompositeHealth {
    pub document: StoreHealth,
    pub graph: StoreHealth,
}

impl CompositeHealth {
    pub fn healthy(&self) -> bool {
        self.document.connected && self.graph.connected
    }

    /// Wire value for the overall status field.
    pub fn status(&self) -> &'static str {
        if self.healthy() {
            "healthy"
        } else {
            "degraded"
        }
    }
}

/// Ping both stores independently and concurrently. A failing store is
/// reported on its own sub-result and never prevents probing the other; the
/// probe itself cannot fail.
pub async fn probe<D, G>(documents: &D, graph: &G, timeout: Duration) -> CompositeHealth
where
    D: DocumentStore,
    G: GraphStore,
{
    let (document_ping, graph_ping) = tokio::join!(
        bounded("document ping", timeout, documents.ping()),
        bounded("graph ping", timeout, graph.ping()),
    );
    if let Err(err) = &document_ping {
        warn!(error = %err, "document store probe failed");
    }
    if let Err(err) = &graph_ping {
        warn!(error = %err, "graph store probe failed");
    }
    CompositeHealth {
        document: StoreHealth::from_ping(document_ping),
        graph: StoreHealth::from_ping(graph_ping),
    }
}
