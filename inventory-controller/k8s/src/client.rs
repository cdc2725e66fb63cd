use anyhow::Result;
use k8s_openapi::{
    api::{
        apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet},
        batch::v1::{CronJob, Job},
        core::v1::{ConfigMap, Pod, Service},
        networking::v1::Ingress,
    },
    NamespaceResourceScope,
};
use kube::{
    api::{Api, ListParams, ObjectList},
    Client, Resource,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use inventory_controller_core::{ListResources, ResourceKind};

/// Cluster-API collaborator: lists workload collections as opaque JSON
/// documents for the data sink.
#[derive(Clone)]
pub struct Inventory {
    pub(crate) client: Client,
}

// === impl Inventory ===

impl Inventory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists a namespaced kind across the allow-listed namespaces, or
    /// across the whole cluster when the allow-list is empty. A bad
    /// namespace in the allow-list must not cost us the rest, so
    /// per-namespace failures are logged and skipped.
    async fn list_namespaced<K>(&self, namespaces: &[String]) -> Result<Vec<Value>>
    where
        K: Resource<Scope = NamespaceResourceScope>
            + Clone
            + std::fmt::Debug
            + DeserializeOwned
            + Serialize,
        K::DynamicType: Default,
    {
        let params = ListParams::default();
        if namespaces.is_empty() {
            let list = Api::<K>::all(self.client.clone()).list(&params).await?;
            return to_values(list);
        }

        let mut items = Vec::new();
        for ns in namespaces {
            match Api::<K>::namespaced(self.client.clone(), ns)
                .list(&params)
                .await
            {
                Ok(list) => items.extend(to_values(list)?),
                Err(error) => warn!(%error, namespace = %ns, "unable to list namespace"),
            }
        }
        Ok(items)
    }
}

#[async_trait::async_trait]
impl ListResources for Inventory {
    async fn list(&self, kind: ResourceKind, namespaces: &[String]) -> Result<Vec<Value>> {
        match kind {
            ResourceKind::Pods => self.list_namespaced::<Pod>(namespaces).await,
            ResourceKind::Deployments => self.list_namespaced::<Deployment>(namespaces).await,
            ResourceKind::Daemonsets => self.list_namespaced::<DaemonSet>(namespaces).await,
            ResourceKind::Replicasets => self.list_namespaced::<ReplicaSet>(namespaces).await,
            ResourceKind::Statefulsets => self.list_namespaced::<StatefulSet>(namespaces).await,
            ResourceKind::Jobs => self.list_namespaced::<Job>(namespaces).await,
            ResourceKind::Cronjobs => self.list_namespaced::<CronJob>(namespaces).await,
            ResourceKind::Services => self.list_namespaced::<Service>(namespaces).await,
            ResourceKind::Ingresses => self.list_namespaced::<Ingress>(namespaces).await,
            ResourceKind::Configmaps => self.list_namespaced::<ConfigMap>(namespaces).await,
            ResourceKind::Nodes => self.list_nodes().await,
            ResourceKind::ClusterEvents => self.list_cluster_events().await,
        }
    }
}

fn to_values<K: Clone + Serialize>(list: ObjectList<K>) -> Result<Vec<Value>> {
    list.items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_flatten_to_opaque_documents() {
        let list: ObjectList<Pod> = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "PodList",
            "metadata": {},
            "items": [
                {"metadata": {"name": "web-0", "labels": {"team": "web"}}},
                {"metadata": {"name": "db-0"}},
            ],
        }))
        .unwrap();

        let values = to_values(list).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["metadata"]["labels"]["team"], "web");
        assert_eq!(values[1]["metadata"]["name"], "db-0");
    }
}
