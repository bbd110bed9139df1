use color_eyre::eyre::Context;
use services_portal::{router, HttpEnvironment, SHELL_CONFIG};
use tracing::debug;

fn main() -> color_eyre::Result<()> {
    services_portal::initialize()?;

    // Reads SENTRY_DSN, reporting is disabled without it
    let _sentry = sentry::init(sentry::ClientOptions {
        release: sentry::release_name!(),
        traces_sample_rate: 1.0,
        ..Default::default()
    });

    SHELL_CONFIG
        .validate()
        .wrap_err("shell configuration is invalid")?;
    debug!(shell_config = ?SHELL_CONFIG, "loaded shell configuration");

    let http = HttpEnvironment::from_env().wrap_err("failed to load http environment")?;

    // Drop into the async runtime after the initial setup
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start the async runtime")?
        .block_on(router::serve(http))
}
