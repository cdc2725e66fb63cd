use axum::{http::StatusCode, response::IntoResponse, Json};

use inventory_controller_core::{InvalidResourceKind, ResourceKind, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownKind(#[from] InvalidResourceKind),

    #[error("no permissions supplied")]
    NoPermissions,

    #[error("cache lookup for {kind} failed: {source}")]
    Cache {
        kind: ResourceKind,
        #[source]
        source: StoreError,
    },

    #[error("cached value has unexpected shape: {0}")]
    UnexpectedShape(&'static str),
}

// === impl ApiError ===

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UnknownKind(_) => StatusCode::BAD_REQUEST,
            Self::NoPermissions => StatusCode::FORBIDDEN,
            Self::Cache { .. } | Self::UnexpectedShape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.to_string())).into_response()
    }
}
