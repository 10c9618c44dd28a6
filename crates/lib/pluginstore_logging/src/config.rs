use crate::LogFormat;
use pluginstore_config::{AppConfig, env, maybe_env};

/// Default filter directive when `PLUGINSTORE_LOG` is unset.
pub(crate) const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug)]
pub struct SentryConfig {
    pub dsn: sentry::types::Dsn,
    pub traces_sample_rate: f32,
}

#[derive(Debug)]
pub struct Config {
    pub format: LogFormat,
    /// Default directive for the `EnvFilter`, overridden by `PLUGINSTORE_LOG`.
    pub default_directive: String,
    pub sentry: Option<SentryConfig>,
}

impl AppConfig for Config {
    fn from_environment() -> anyhow::Result<Self> {
        Ok(Self {
            format: maybe_env("LOG_FORMAT")?.unwrap_or_default(),
            default_directive: DEFAULT_DIRECTIVE.to_owned(),
            sentry: maybe_env("!SENTRY_DSN")?.map(|dsn| SentryConfig {
                dsn,
                traces_sample_rate: env("!SENTRY_TRACES_SAMPLE_RATE", 0.0).unwrap_or(0.0),
            }),
        })
    }

    #[cfg(any(test, feature = "testing"))]
    fn test_config() -> anyhow::Result<Self> {
        Ok(Self {
            format: LogFormat::Pretty,
            default_directive: "trace".to_owned(),
            sentry: None,
        })
    }
}
