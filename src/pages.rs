//! Server rendered HTML, built with dioxus and rendered to a string per
//! request.

use axum::response::{Html, IntoResponse, Response};
use dioxus::prelude::*;

use crate::shell_config::SHELL_CONFIG;

mod error;
mod services;

pub use {
    error::{not_found, panic_error},
    services::services,
};

/// A full HTML document: the shared `<head>` plus page specific content
pub struct Page<'e> {
    pub title: String,
    pub content: LazyNodes<'e, 'e>,
}

impl<'e> Page<'e> {
    fn document(self) -> LazyNodes<'e, 'e> {
        let Page { title, content } = self;
        let app_name = SHELL_CONFIG.app_name;

        rsx! {
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1.0" }
                link { rel: "icon", href: "/favicon.ico" }
                title { "{title} | {app_name}" }
            }
            body { content }
        }
    }
}

impl<'e> IntoResponse for Page<'e> {
    fn into_response(self) -> Response {
        let markup = dioxus_ssr::render_lazy(self.document());

        Html(format!("<!DOCTYPE html><html lang=\"en\">{markup}</html>")).into_response()
    }
}
