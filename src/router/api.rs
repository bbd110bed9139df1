use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::shell_config::{ShellConfig, SHELL_CONFIG};

use super::middleware::{build_info::BuildInfo, RequestMetadata};

/// JSON body for API routes that do not exist
#[derive(Debug, Serialize)]
pub struct UnknownEndpoint {
    message: &'static str,
    endpoint: String,
    request_id: String,
    server: BuildInfo,
}

impl IntoResponse for UnknownEndpoint {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(self)).into_response()
    }
}

pub async fn not_found(metadata: RequestMetadata, OriginalUri(uri): OriginalUri) -> UnknownEndpoint {
    UnknownEndpoint {
        message: "endpoint does not exist",
        endpoint: uri.path().to_string(),
        request_id: metadata.request_id,
        server: metadata.server,
    }
}

pub async fn healthy() -> &'static str {
    "OK"
}

/// Read by the packaging tooling and by the native shell at runtime
#[tracing::instrument]
#[axum::debug_handler]
pub async fn shell_config() -> Json<ShellConfig> {
    Json(SHELL_CONFIG)
}

/// Exercises the panic page in development builds
#[axum::debug_handler]
pub async fn panic() {
    panic!("manual api panic")
}
