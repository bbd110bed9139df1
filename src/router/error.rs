use axum::{extract::OriginalUri, response::Response};
use tracing::debug;

use crate::pages;

pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    debug!(path = uri.path(), "no route matched");

    pages::not_found(uri.path())
}
