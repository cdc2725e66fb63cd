use serde_json::Value;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{debug, warn};

use inventory_controller_core::{ConfigStore, ListResources, ResourceKind, Store};

use crate::{metrics::SinkMetrics, poller};

/// Cluster-scoped collectors poll on a slower cadence; node metrics
/// aggregation is expensive and tolerates more staleness.
const SLOW_CADENCE_OFFSET: Duration = Duration::from_secs(20);

/// Mirrors one resource kind into the cache on every poll tick.
pub struct Collector {
    kind: ResourceKind,
    lister: Arc<dyn ListResources>,
    config: Arc<dyn ConfigStore>,
    store: Arc<dyn Store>,
    metrics: SinkMetrics,
}

// === impl Collector ===

impl Collector {
    pub fn new(
        kind: ResourceKind,
        lister: Arc<dyn ListResources>,
        config: Arc<dyn ConfigStore>,
        store: Arc<dyn Store>,
        metrics: SinkMetrics,
    ) -> Self {
        Self {
            kind,
            lister,
            config,
            store,
            metrics,
        }
    }

    /// Runs one collection cycle. Every failure is logged and the cycle
    /// skipped; the previous cache value, possibly stale or absent,
    /// stays authoritative until the next successful cycle.
    pub async fn run_once(&self) {
        let kind = self.kind.as_str();
        let config = match self.config.get_cluster_config().await {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, kind, "unable to read cluster config; skipping collection");
                self.metrics.incr_errors(self.kind);
                return;
            }
        };

        debug!(kind, "collecting");
        let namespaces = if self.kind.cluster_scoped() {
            &[][..]
        } else {
            &config.namespaces[..]
        };
        let items = match self.lister.list(self.kind, namespaces).await {
            Ok(items) => items,
            Err(error) => {
                warn!(%error, kind, "unable to list resources; skipping collection");
                self.metrics.incr_errors(self.kind);
                return;
            }
        };

        let key = self.kind.cache_key(config.cluster_name());
        if let Err(error) = self.store.put(&key, &Value::Array(items)).await {
            warn!(%error, kind, %key, "unable to write collection to the cache");
            self.metrics.incr_errors(self.kind);
            return;
        }
        self.metrics.incr_collections(self.kind);
    }
}

/// Fans periodic collection out across every resource kind. All
/// collectors share the cache and the shutdown signal and nothing else.
pub struct DataSink {
    lister: Arc<dyn ListResources>,
    config: Arc<dyn ConfigStore>,
    store: Arc<dyn Store>,
    metrics: SinkMetrics,
}

// === impl DataSink ===

impl DataSink {
    pub fn new(
        lister: Arc<dyn ListResources>,
        config: Arc<dyn ConfigStore>,
        store: Arc<dyn Store>,
        metrics: SinkMetrics,
    ) -> Self {
        Self {
            lister,
            config,
            store,
            metrics,
        }
    }

    /// Spawns one poller per resource kind.
    pub fn spawn(&self, shutdown: drain::Watch, interval: Duration) {
        for kind in ResourceKind::ALL {
            let period = if kind.cluster_scoped() {
                interval + SLOW_CADENCE_OFFSET
            } else {
                interval
            };
            let collector = Arc::new(Collector::new(
                kind,
                self.lister.clone(),
                self.config.clone(),
                self.store.clone(),
                self.metrics.clone(),
            ));
            poller::spawn(shutdown.clone(), period, move || {
                let collector = collector.clone();
                async move { collector.run_once().await }
            });
        }
    }
}
