use std::collections::HashMap;

use anyhow::Result;
use k8s_openapi::api::core::v1::Node;
use kube::{
    api::{Api, ApiResource, DynamicObject, GroupVersionKind, ListParams},
    ResourceExt,
};
use serde_json::{json, Value};
use tracing::debug;

use super::client::Inventory;

// === impl Inventory ===

impl Inventory {
    /// Lists cluster nodes, pairing each with its live usage sample from
    /// the metrics API. Metrics are best-effort: when the metrics-server
    /// is absent the nodes are reported without them.
    pub(crate) async fn list_nodes(&self) -> Result<Vec<Value>> {
        let nodes = Api::<Node>::all(self.client.clone())
            .list(&ListParams::default())
            .await?;

        let mut usage = match self.node_usage().await {
            Ok(usage) => usage,
            Err(error) => {
                debug!(%error, "node metrics unavailable");
                HashMap::new()
            }
        };

        nodes
            .items
            .iter()
            .map(|node| {
                let name = node.name_any();
                let metrics = usage.remove(&name).unwrap_or(Value::Null);
                Ok(json!({
                    "node": serde_json::to_value(node)?,
                    "metrics": metrics,
                }))
            })
            .collect()
    }

    /// Fetches per-node usage from metrics.k8s.io, keyed by node name.
    async fn node_usage(&self) -> Result<HashMap<String, Value>> {
        let gvk = GroupVersionKind::gvk("metrics.k8s.io", "v1beta1", "NodeMetrics");
        let resource = ApiResource::from_gvk_with_plural(&gvk, "nodes");
        let metrics = Api::<DynamicObject>::all_with(self.client.clone(), &resource)
            .list(&ListParams::default())
            .await?;

        Ok(metrics
            .items
            .into_iter()
            .map(|item| {
                let name = item.name_any();
                let usage = item
                    .data
                    .get("usage")
                    .cloned()
                    .unwrap_or(Value::Null);
                (name, usage)
            })
            .collect())
    }
}
