use std::backtrace::{Backtrace, BacktraceStatus};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus::prelude::*;

use crate::router::middleware::catch_panic::CaughtPanic;

use super::Page;

fn status_page<'a>(status: StatusCode, detail_nodes: LazyNodes<'a, 'a>) -> Response {
    let heading = match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    };

    let page = Page {
        title: heading.clone(),
        content: rsx! {
            main {
                class: "status",
                h1 { "{heading}" }
                div { detail_nodes }
                p { a { href: "/", "Back to the start page" } }
            }
        },
    };

    (status, page).into_response()
}

pub fn not_found(path: &str) -> Response {
    status_page(
        StatusCode::NOT_FOUND,
        rsx! {
            p { "Nothing lives at " code { "{path}" } "." }
        },
    )
}

/// Diagnostics are only rendered into development builds
pub fn panic_error(panic: &CaughtPanic) -> Response {
    if !cfg!(debug_assertions) {
        return status_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            rsx! { p { "Something went wrong on our side." } },
        );
    }

    let message = &panic.message;
    let location = panic.location.as_deref().unwrap_or("an unknown location");
    let span_trace = panic.span_trace.to_string();
    let backtrace = describe_backtrace(&panic.backtrace);

    status_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        rsx! {
            p { "Handler panicked at {location}: {message}" }
            h2 { "Span trace" }
            pre { "{span_trace}" }
            h2 { "Backtrace" }
            pre { "{backtrace}" }
        },
    )
}

fn describe_backtrace(backtrace: &Backtrace) -> String {
    match backtrace.status() {
        BacktraceStatus::Captured => backtrace.to_string(),
        BacktraceStatus::Disabled => "disabled, set RUST_BACKTRACE=1 to capture".to_string(),
        BacktraceStatus::Unsupported => "not supported on this platform".to_string(),
        status => format!("{status:?}"),
    }
}
