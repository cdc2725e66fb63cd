use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cluster-level settings administered through an external path and
/// read once per collection or serving cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterConfig {
    pub cluster_name: String,
    /// Namespace allow-list for namespaced collectors; empty means all
    /// namespaces.
    pub namespaces: Vec<String>,
    pub global_read_only: bool,
    pub replica_scale_limits: BTreeMap<String, i32>,
    pub default_replica_scale_limit: i32,
}

// === impl ClusterConfig ===

impl ClusterConfig {
    /// The cluster name is never empty at serve time.
    pub fn cluster_name(&self) -> &str {
        if self.cluster_name.is_empty() {
            "default"
        } else {
            &self.cluster_name
        }
    }

    /// Resolves the replica scale limit for an object from its labels;
    /// the first label value with a configured limit wins.
    pub fn scale_limit_for(&self, labels: &BTreeMap<String, String>) -> i32 {
        labels
            .values()
            .find_map(|value| self.replica_scale_limits.get(value).copied())
            .unwrap_or(self.default_replica_scale_limit)
    }
}

/// Config store collaborator; backed by the administrative database in
/// production.
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_cluster_config(&self) -> anyhow::Result<ClusterConfig>;
}
