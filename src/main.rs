//! Process entry point: logging, configuration, store connections, serve.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinegate::config::GatewayConfig;
use cinegate::gateway::Gateway;
use cinegate::http;
use cinegate::store::{MongoMovieStore, Neo4jReviewStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::load()?;

    let documents = MongoMovieStore::connect(&config).await?;
    let graph = Neo4jReviewStore::connect(&config).await?;
    let gateway = Arc::new(Gateway::new(documents, graph, &config));

    info!(bind = %config.bind, "cinegate listening");
    http::serve(gateway, &config.bind).await?;
    Ok(())
}
