use axum::http::uri::Scheme;

pub mod build_info;
pub mod catch_panic;
pub mod request_metadata;
pub mod trace;

pub use request_metadata::RequestMetadata;

/// Scheme the service is reached over once deployed
pub fn scheme() -> Scheme {
    if cfg!(debug_assertions) {
        Scheme::HTTP
    } else {
        Scheme::HTTPS
    }
}
