use serde_json::Value;

use crate::ResourceKind;

/// List operations provided by the cluster-API collaborator. Resource
/// records are opaque JSON documents; the filter only ever inspects
/// `metadata.labels`.
#[async_trait::async_trait]
pub trait ListResources: Send + Sync {
    /// Lists the current collection for `kind`, constrained to
    /// `namespaces` when the allow-list is non-empty. Cluster-scoped
    /// kinds ignore the allow-list.
    async fn list(&self, kind: ResourceKind, namespaces: &[String])
        -> anyhow::Result<Vec<Value>>;
}
