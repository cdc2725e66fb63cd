use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::Parser;
use prometheus_client::registry::Registry;
use tokio::time::Duration;
use tracing::{info_span, Instrument};

use crate::{
    api::{self, InventoryApi},
    cache::RedisStore,
    config::FileConfigStore,
    k8s::Inventory,
    sink::{DataSink, SinkMetrics},
};

#[derive(Debug, Parser)]
#[clap(name = "inventory", about = "A workload inventory controller")]
pub struct Args {
    #[clap(
        long,
        default_value = "inventory=info,warn",
        env = "INVENTORY_CONTROLLER_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    #[clap(flatten)]
    admin: kubert::AdminArgs,

    #[clap(long, default_value = "0.0.0.0:8080")]
    api_addr: SocketAddr,

    /// Connection string for the cache backend.
    #[clap(
        long,
        default_value = "redis://redis-master.redis:6379",
        env = "INVENTORY_CACHE_URL"
    )]
    cache_url: String,

    /// Seconds between collection cycles for namespaced kinds.
    #[clap(long, default_value = "5")]
    sync_interval_secs: u64,

    /// Path to the mounted cluster config file.
    #[clap(
        long,
        default_value = "cluster-config.json",
        env = "INVENTORY_CLUSTER_CONFIG"
    )]
    cluster_config_path: PathBuf,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            admin,
            client,
            log_level,
            log_format,
            api_addr,
            cache_url,
            sync_interval_secs,
            cluster_config_path,
        } = self;

        let mut prom = <Registry>::default();
        let sink_metrics = SinkMetrics::register(prom.sub_registry_with_prefix("data_sink"));
        let rt_metrics = kubert::RuntimeMetrics::register(prom.sub_registry_with_prefix("kube"));

        let runtime = kubert::Runtime::builder()
            .with_log(log_level, log_format)
            .with_metrics(rt_metrics)
            .with_admin(admin.into_builder().with_prometheus(prom))
            .with_client(client)
            .build()
            .await?;

        let store = Arc::new(RedisStore::connect(&cache_url).await?);
        let config = Arc::new(FileConfigStore::new(cluster_config_path));
        let inventory = Inventory::new(runtime.client());

        // Spawn one poller per resource kind, all tied to the runtime's
        // shutdown signal.
        let sink = DataSink::new(
            Arc::new(inventory),
            config.clone(),
            store.clone(),
            sink_metrics,
        );
        sink.spawn(
            runtime.shutdown_handle(),
            Duration::from_secs(sync_interval_secs),
        );

        // Serve snapshots and streams out of the cache.
        let inventory_api = InventoryApi::new(store, config);
        tokio::spawn(
            api::serve(api_addr, inventory_api, runtime.shutdown_handle())
                .instrument(info_span!("api")),
        );

        // Block the main thread on the shutdown signal. Once it fires, wait
        // for the background tasks to complete before exiting.
        if runtime.run().await.is_err() {
            bail!("Aborted");
        }

        Ok(())
    }
}
