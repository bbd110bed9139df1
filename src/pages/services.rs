use dioxus::prelude::*;

use crate::shell_config::SHELL_CONFIG;

use super::Page;

pub async fn services() -> Page<'static> {
    let app_name = SHELL_CONFIG.app_name;

    Page {
        title: "Services".to_string(),
        content: rsx! {
            header {
                h1 { "Services" }
            }
            main {
                p { "Welcome to {app_name}." }
            }
        },
    }
}
