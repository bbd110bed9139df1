use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request};
use tower_http::request_id::RequestId;

use super::build_info::{BuildInfo, BUILD_INFO};

/// Per request details echoed back in API error bodies
#[derive(Debug)]
pub struct RequestMetadata {
    pub request_id: String,
    pub server: BuildInfo,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestMetadata
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Ok(RequestMetadata {
            request_id,
            server: BUILD_INFO,
        })
    }
}
