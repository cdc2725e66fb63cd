use std::{fmt, str::FromStr};

/// A category of cluster object mirrored into the cache by the data
/// sink and served to dashboard clients.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pods,
    Deployments,
    Daemonsets,
    Replicasets,
    Statefulsets,
    Jobs,
    Cronjobs,
    Services,
    Ingresses,
    Configmaps,
    Nodes,
    ClusterEvents,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct InvalidResourceKind(String);

// === impl ResourceKind ===

impl ResourceKind {
    /// Every kind the data sink mirrors.
    pub const ALL: [Self; 12] = [
        Self::Pods,
        Self::Deployments,
        Self::Daemonsets,
        Self::Replicasets,
        Self::Statefulsets,
        Self::Jobs,
        Self::Cronjobs,
        Self::Services,
        Self::Ingresses,
        Self::Configmaps,
        Self::Nodes,
        Self::ClusterEvents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pods => "pods",
            Self::Deployments => "deployments",
            Self::Daemonsets => "daemonsets",
            Self::Replicasets => "replicasets",
            Self::Statefulsets => "statefulsets",
            Self::Jobs => "jobs",
            Self::Cronjobs => "cronjobs",
            Self::Services => "services",
            Self::Ingresses => "ingresses",
            Self::Configmaps => "configmaps",
            Self::Nodes => "nodes",
            Self::ClusterEvents => "clusterevents",
        }
    }

    /// Nodes and cluster events are listed cluster-wide rather than per
    /// allow-listed namespace.
    pub fn cluster_scoped(&self) -> bool {
        matches!(self, Self::Nodes | Self::ClusterEvents)
    }

    /// The cache key for this kind's collection. The format is shared
    /// with every other component reading the same cache, so it must
    /// not drift.
    pub fn cache_key(&self, cluster_name: &str) -> String {
        format!("{}_{}", cluster_name, self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = InvalidResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidResourceKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
        assert!("clusterevent".parse::<ResourceKind>().is_err());
        assert!("".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn cache_key_format() {
        assert_eq!(ResourceKind::Pods.cache_key("default"), "default_pods");
        assert_eq!(
            ResourceKind::ClusterEvents.cache_key("prod-east"),
            "prod-east_clusterevents"
        );
    }

    #[test]
    fn only_nodes_and_events_are_cluster_scoped() {
        let scoped: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(ResourceKind::cluster_scoped)
            .collect();
        assert_eq!(scoped, vec![ResourceKind::Nodes, ResourceKind::ClusterEvents]);
    }
}
