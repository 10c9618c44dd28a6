mod config;
mod log_format;
#[cfg(feature = "testing")]
pub mod testing;

pub use config::{Config, SentryConfig};
pub use log_format::{InvalidLogFormat, LogFormat};

use sentry::integrations::{panic as sentry_panic, tracing as sentry_tracing};
use std::str::FromStr as _;
use tracing_subscriber::{EnvFilter, filter::Directive, prelude::*};

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV_VAR: &str = "PLUGINSTORE_LOG";

/// Keeps the sentry client alive, drop it at the very end of `main`.
pub struct Guard {
    #[allow(dead_code)]
    sentry_guard: Option<sentry::ClientInitGuard>,
}

fn env_filter(default_directive: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(Directive::from_str(default_directive)?)
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy())
}

pub fn init(config: &Config) -> anyhow::Result<Guard> {
    let log_formatter = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    let tracing_registry = tracing_subscriber::registry()
        .with(log_formatter)
        .with(env_filter(&config.default_directive)?);

    let sentry_guard = if let Some(ref sentry_config) = config.sentry {
        tracing::subscriber::set_global_default(
            tracing_registry.with(sentry_tracing::layer()),
        )?;

        Some(sentry::init((
            sentry_config.dsn.clone(),
            sentry::ClientOptions {
                release: Some(env!("CARGO_PKG_VERSION").into()),
                attach_stacktrace: true,
                traces_sample_rate: sentry_config.traces_sample_rate,
                ..Default::default()
            }
            .add_integration(sentry_panic::PanicIntegration::default()),
        )))
    } else {
        tracing::subscriber::set_global_default(tracing_registry)?;
        None
    };

    Ok(Guard { sentry_guard })
}
