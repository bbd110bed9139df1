use axum::response::Redirect;

/// Where the root of the application permanently lives
pub const SERVICES_PATH: &str = "/services";

/// The root route is a durable alias of the services page, so clients may
/// cache the redirect.
#[tracing::instrument]
#[axum::debug_handler]
pub async fn index() -> Redirect {
    Redirect::permanent(SERVICES_PATH)
}

pub async fn favicon() -> Redirect {
    Redirect::to("/static/favicon.ico")
}
