use std::{env, ffi::OsString, net::SocketAddr, path::PathBuf};

use axum::http::uri::Authority;
use color_eyre::{
    eyre::{eyre, Context},
    Help,
};
use tracing::debug;

use crate::shell_config::SHELL_CONFIG;

#[derive(Debug, Clone)]
pub struct HttpEnvironment {
    pub bind: SocketAddr,
    pub static_dir: PathBuf,
    pub domain: Authority,
}

impl HttpEnvironment {
    pub fn from_env() -> color_eyre::Result<HttpEnvironment> {
        Self::from_lookup(|key| env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> color_eyre::Result<Self> {
        let bind = required(&lookup, "BIND")?
            .parse::<SocketAddr>()
            .wrap_err("$BIND should be a valid SocketAddr")
            .suggestion("use an address and port, e.g. 0.0.0.0:8080")?;

        let domain = required(&lookup, "DOMAIN")?
            .parse::<Authority>()
            .wrap_err("$DOMAIN should be a valid URI authority")?;

        let static_dir = match lookup("STATIC_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                debug!(web_dir = SHELL_CONFIG.web_dir, "$STATIC_DIR not set, serving webDir");

                SHELL_CONFIG.web_dir().to_path_buf()
            }
        };

        Ok(HttpEnvironment {
            bind,
            static_dir,
            domain,
        })
    }
}

fn required(lookup: impl Fn(&str) -> Option<OsString>, key: &str) -> color_eyre::Result<String> {
    lookup(key)
        .ok_or_else(|| eyre!("${key} should be set"))
        .note("make sure you are providing the required environment variables")?
        .into_string()
        .map_err(|value| eyre!("${key} should be valid unicode, found {value:?}"))
}
