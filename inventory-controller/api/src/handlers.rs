use std::sync::Arc;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;
use tracing::{debug, warn};

use inventory_controller_core::{
    filter, ClusterConfig, ConfigStore, PermissionSet, ResourceKind, ResourceView, Store,
};

use crate::ApiError;

/// Permission labels extracted from the authenticated caller, installed
/// as a request extension by the fronting auth layer.
#[derive(Clone, Debug)]
pub struct UserPermissions(pub PermissionSet);

/// Shared handler state: the resource cache plus the cluster config used
/// to scope filtering.
#[derive(Clone)]
pub struct InventoryApi {
    store: Arc<dyn Store>,
    config: Arc<dyn ConfigStore>,
}

// === impl InventoryApi ===

impl InventoryApi {
    pub fn new(store: Arc<dyn Store>, config: Arc<dyn ConfigStore>) -> Self {
        Self { store, config }
    }

    /// Reads the cluster config, falling back to defaults when the
    /// source is unavailable so that serving degrades instead of
    /// failing.
    async fn cluster_config(&self) -> ClusterConfig {
        match self.config.get_cluster_config().await {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "unable to read cluster config; using defaults");
                ClusterConfig::default()
            }
        }
    }

    /// Loads the cached collection for `kind` and filters it down to the
    /// views the caller's permissions allow.
    async fn get_filtered_resource(
        &self,
        kind: ResourceKind,
        permissions: &PermissionSet,
    ) -> Result<Vec<ResourceView>, ApiError> {
        let config = self.cluster_config().await;
        let key = kind.cache_key(config.cluster_name());
        let cached = self
            .store
            .get(&key)
            .await
            .map_err(|source| ApiError::Cache { kind, source })?;
        let items = match cached {
            Value::Array(items) => items,
            _ => return Err(ApiError::UnexpectedShape("expected a JSON array")),
        };
        Ok(filter(kind, items, permissions, config.global_read_only))
    }
}

pub fn router(api: InventoryApi) -> Router {
    Router::new()
        .route("/api/inventory/name", get(get_cluster_name))
        .route("/api/inventory/{kind}", get(get_resource))
        .with_state(api)
}

async fn get_cluster_name(State(api): State<InventoryApi>) -> Json<String> {
    Json(api.cluster_config().await.cluster_name().to_string())
}

/// Serves a resource collection either as a one-shot snapshot or, when
/// the client requests a websocket upgrade, as a pull-triggered stream:
/// each client message elicits a fresh snapshot.
async fn get_resource(
    State(api): State<InventoryApi>,
    Path(kind): Path<String>,
    permissions: Option<Extension<UserPermissions>>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, ApiError> {
    let kind = kind.parse::<ResourceKind>()?;
    let Some(Extension(UserPermissions(permissions))) = permissions else {
        return Err(ApiError::NoPermissions);
    };

    // A request that is not a well-formed upgrade gets the snapshot.
    match upgrade.ok() {
        Some(upgrade) => Ok(upgrade
            .on_upgrade(move |socket| stream_resource(socket, api, kind, permissions))
            .into_response()),
        None => {
            let views = api.get_filtered_resource(kind, &permissions).await?;
            Ok(Json(views).into_response())
        }
    }
}

async fn stream_resource(
    mut socket: WebSocket,
    api: InventoryApi,
    kind: ResourceKind,
    permissions: PermissionSet,
) {
    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(error) => {
                debug!(%error, %kind, "websocket receive failed");
                break;
            }
        }

        let views = match api.get_filtered_resource(kind, &permissions).await {
            Ok(views) => views,
            Err(error) => {
                warn!(%error, %kind, "unable to refresh resource stream");
                break;
            }
        };
        let payload = match serde_json::to_string(&views) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, %kind, "unable to encode resource views");
                break;
            }
        };
        if let Err(error) = socket.send(Message::Text(payload.into())).await {
            debug!(%error, %kind, "websocket send failed");
            break;
        }
    }
}
