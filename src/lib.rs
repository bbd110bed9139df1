use tracing::metadata::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

pub mod environment;
pub mod pages;
pub mod router;
pub mod shell_config;

pub use environment::HttpEnvironment;
pub use shell_config::{ShellConfig, SHELL_CONFIG};

pub fn initialize() -> color_eyre::Result<()> {
    // Setup error reporting
    color_eyre::install()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(
            EnvFilter::from_default_env()
                .add_directive(LevelFilter::INFO.into())
                .add_directive("hyper=warn".parse()?)
                .add_directive(format!("{}=trace", env!("CARGO_CRATE_NAME")).parse()?),
        )
        .with(ErrorLayer::default())
        .with(sentry::integrations::tracing::layer())
        .init();

    Ok(())
}
