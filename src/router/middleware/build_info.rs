use axum::http::{HeaderName, HeaderValue};
use git_version::git_version;
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;

/// Which build of the service answered a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub commit: &'static str,
    /// `development` for debug builds, `production` otherwise
    pub environment: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    commit: git_version!(args = ["--always", "--dirty=-modified"], fallback = "unknown"),
    environment: if cfg!(debug_assertions) {
        "development"
    } else {
        "production"
    },
};

const ORIGIN_SERVER: &str = const_format::formatcp!(
    "{}@{} (commit {})",
    BUILD_INFO.name,
    BUILD_INFO.version,
    BUILD_INFO.commit
);

pub fn origin_server_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static("x-origin-server"),
        HeaderValue::from_static(ORIGIN_SERVER),
    )
}

pub fn environment_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        HeaderName::from_static("x-server-environment"),
        HeaderValue::from_static(BUILD_INFO.environment),
    )
}
