use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use color_eyre::eyre::Context;
use tower_http::{
    cors::CorsLayer, request_id::MakeRequestUuid, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer, ServiceBuilderExt,
};
use tracing::{debug, info};

use middleware::{build_info, catch_panic::catch_panic_layer, trace::SpanMaker};

use crate::{environment::HttpEnvironment, pages};

pub mod api;
pub mod error;
pub mod index;
pub mod middleware;

pub fn app(http: &HttpEnvironment) -> color_eyre::Result<Router> {
    let origin = HeaderValue::from_str(&format!("{}://{}", middleware::scheme(), http.domain))
        .wrap_err("DOMAIN should form a valid origin header")?;

    let api_router = Router::new()
        .route("/healthy", get(api::healthy))
        .route("/shell-config", get(api::shell_config))
        .route("/panic", {
            if cfg!(debug_assertions) {
                get(api::panic)
            } else {
                get(api::not_found)
            }
        })
        .fallback(api::not_found);

    Ok(Router::new()
        .route("/", get(index::index))
        .route(index::SERVICES_PATH, get(pages::services))
        .nest("/api", api_router)
        .route("/favicon.ico", get(index::favicon))
        .nest_service(
            "/static",
            ServeDir::new(&http.static_dir)
                .append_index_html_on_directories(false)
                .call_fallback_on_method_not_allowed(true),
        )
        .fallback(error::not_found)
        .layer(
            tower::ServiceBuilder::new()
                // Hide sensitive headers
                .sensitive_headers([header::AUTHORIZATION, header::COOKIE])
                // Give a unique identifier to every request
                .set_x_request_id(MakeRequestUuid)
                .propagate_x_request_id()
                // Send traces to sentry
                .layer(sentry::integrations::tower::NewSentryLayer::new_from_top())
                .layer(sentry::integrations::tower::SentryHttpLayer::with_transaction())
                // Trace requests and responses
                .layer(TraceLayer::new_for_http().make_span_with(SpanMaker))
                // Timeout if request or response hangs
                .layer(TimeoutLayer::new(Duration::from_secs(10)))
                // Compress responses
                .map_response_body(axum::body::boxed)
                .compression()
                // Send CORS headers
                .layer(
                    CorsLayer::new()
                        .allow_credentials(false)
                        .allow_headers([])
                        .allow_methods([])
                        .allow_origin([origin]),
                )
                // Identify the server build on every response
                .layer(build_info::origin_server_layer())
                .layer(build_info::environment_layer())
                // Catch Panics in handlers
                .layer(catch_panic_layer()),
        ))
}

pub async fn serve(http: HttpEnvironment) -> color_eyre::Result<()> {
    let app = app(&http)?;

    let server = axum::Server::try_bind(&http.bind).wrap_err("failed to bind to given address")?;

    info!(bind = %http.bind, domain = %http.domain, static_dir = ?http.static_dir, "started http server");
    server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("http server encountered an error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => debug!("received ctrl-c, shutting down http server"),
        Err(error) => debug!(%error, "unable to listen for ctrl-c, server will not shut down gracefully"),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::shell_config::SHELL_CONFIG;

    const DOMAIN: &str = "portal.test";

    fn test_app() -> Router {
        let http = HttpEnvironment {
            bind: "127.0.0.1:0".parse().unwrap(),
            static_dir: SHELL_CONFIG.web_dir().to_path_buf(),
            domain: DOMAIN.parse().unwrap(),
        };

        app(&http).unwrap()
    }

    async fn request(method: Method, host: &str, uri: &str) -> Response {
        test_app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::HOST, host)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(uri: &str) -> Response {
        request(Method::GET, DOMAIN, uri).await
    }

    async fn body_string(response: Response) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(header::LOCATION)
            .map(|location| location.to_str().unwrap())
    }

    #[tokio::test]
    async fn root_permanently_redirects_to_services() {
        let response = get("/").await;

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), Some("/services"));
    }

    #[tokio::test]
    async fn root_redirect_ignores_request_content() {
        for uri in ["/?next=/account", "/?a=1&b=2", "/?"] {
            let response = get(uri).await;

            assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT, "{uri}");
            assert_eq!(location(&response), Some("/services"), "{uri}");
        }

        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::HOST, DOMAIN)
                    .header(header::COOKIE, "session=abc")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from("ignored"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), Some("/services"));

        let response = request(Method::HEAD, DOMAIN, "/").await;

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), Some("/services"));
    }

    #[tokio::test]
    async fn services_does_not_redirect() {
        let response = get("/services").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(location(&response), None);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let body = body_string(response).await;
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Services"));
    }

    #[tokio::test]
    async fn redirect_then_follow_lands_on_services() {
        let redirect = get("/").await;
        let target = location(&redirect).unwrap().to_string();

        let response = get(&target).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn serves_shell_config() {
        let response = get("/api/shell-config").await;

        assert_eq!(response.status(), StatusCode::OK);

        let value: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(value["appId"], SHELL_CONFIG.app_id);
        assert_eq!(value["appName"], SHELL_CONFIG.app_name);
        assert_eq!(value["webDir"], SHELL_CONFIG.web_dir);
        assert_eq!(value["bundledWebRuntime"], SHELL_CONFIG.bundled_web_runtime);
    }

    #[tokio::test]
    async fn healthy() {
        let response = get("/api/healthy").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let response = get("/does/not/exist").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("/does/not/exist"));

        let response = get("/api/does-not-exist").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_redirect_ignores_host() {
        for host in ["elsewhere.test", "portal.test:8443", "127.0.0.1"] {
            let response = request(Method::GET, host, "/").await;

            assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT, "{host}");
            assert_eq!(location(&response), Some("/services"), "{host}");
        }

        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), Some("/services"));
    }

    #[tokio::test]
    async fn responses_identify_the_server() {
        let response = get("/services").await;

        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key("x-origin-server"));
        assert!(response.headers().contains_key("x-server-environment"));
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    async fn handler_panics_become_error_pages() {
        let response = get("/api/panic").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("manual api panic"));
    }

    #[cfg(debug_assertions)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_panics_report_their_own_location() {
        let app = test_app();

        let requests = (0..32).map(|_| {
            let app = app.clone();

            tokio::spawn(async move {
                let response = app
                    .oneshot(
                        Request::builder()
                            .uri("/api/panic")
                            .body(Body::empty())
                            .unwrap(),
                    )
                    .await
                    .unwrap();

                assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
                body_string(response).await
            })
        });

        for body in futures::future::join_all(requests).await {
            let body = body.unwrap();

            assert!(body.contains("src/router/api.rs"), "{body}");
            assert!(!body.contains("an unknown location"), "{body}");
        }
    }
}
