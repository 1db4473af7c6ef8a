//! Process configuration, loaded from the environment over defaults.

use std::time::Duration;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::reconcile::DEFAULT_SAMPLE_CAP;

/// Connection and tuning settings consumed once at process start. The
/// running service only ever sees this through the gateway's constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Address the HTTP listener binds.
    pub bind: String,
    pub mongo_uri: String,
    pub mongo_db: String,
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    /// Per-store sampling bound for reconciliation.
    pub sample_cap: usize,
    /// Time limit applied to every store operation.
    pub operation_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_db: "sample_mflix".to_string(),
            neo4j_uri: "bolt://localhost:7687".to_string(),
            neo4j_user: "neo4j".to_string(),
            neo4j_password: String::new(),
            sample_cap: DEFAULT_SAMPLE_CAP,
            operation_timeout_secs: 10,
        }
    }
}

impl GatewayConfig {
    /// Environment over defaults. Variable names match the deployment's
    /// existing ones (`MONGO_URI`, `MONGO_DB`, `NEO4J_URI`, ...).
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(GatewayConfig::default()))
            .merge(Env::raw().only(&[
                "bind",
                "mongo_uri",
                "mongo_db",
                "neo4j_uri",
                "neo4j_user",
                "neo4j_password",
                "sample_cap",
                "operation_timeout_secs",
            ]))
            .extract()
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}
