#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod error;
mod handlers;

pub use self::{
    error::ApiError,
    handlers::{router, InventoryApi, UserPermissions},
};

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

/// Binds the HTTP listener and serves the inventory API until the drain
/// signal fires, at which point in-flight connections are allowed to
/// finish.
pub async fn serve(addr: SocketAddr, api: InventoryApi, drain: drain::Watch) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving inventory API");
    axum::serve(listener, router(api))
        .with_graceful_shutdown(async move {
            let release = drain.signaled().await;
            drop(release);
        })
        .await?;
    Ok(())
}
