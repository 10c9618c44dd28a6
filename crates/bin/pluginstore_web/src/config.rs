use crate::cache::CachePolicy;
use anyhow::{Result, ensure};
use pluginstore_config::{AppConfig, maybe_env, require_env};
use std::{path::PathBuf, time::Duration};

#[derive(Debug, bon::Builder)]
pub struct Config {
    /// Configuration directory of the host application.
    /// Themes live directly below it, community plugins in `www/community`.
    #[builder(into)]
    pub(crate) config_root: PathBuf,

    /// `max-age` in seconds for `CachePolicy::LongLived`, 31 days.
    #[builder(default = 2_678_400u32)]
    pub(crate) long_lived_max_age: u32,

    #[builder(default = CachePolicy::LongLived)]
    pub(crate) themes_cache_policy: CachePolicy,

    #[builder(default = CachePolicy::Revalidate)]
    pub(crate) community_cache_policy: CachePolicy,

    // request timeout in seconds
    #[builder(with = |secs: u64| Duration::from_secs(secs))]
    pub(crate) request_timeout: Option<Duration>,

    /// upper bound for the threads doing blocking file system work.
    #[builder(default = 64usize)]
    pub(crate) max_blocking_threads: usize,
}

impl Config {
    pub fn max_blocking_threads(&self) -> usize {
        self.max_blocking_threads
    }
}

impl AppConfig for Config {
    fn from_environment() -> Result<Self> {
        let config = Self::builder()
            .config_root(require_env::<PathBuf>("CONFIG_ROOT")?)
            .maybe_long_lived_max_age(maybe_env("LONG_LIVED_MAX_AGE")?)
            .maybe_themes_cache_policy(maybe_env("THEMES_CACHE_POLICY")?)
            .maybe_community_cache_policy(maybe_env("COMMUNITY_CACHE_POLICY")?)
            .maybe_request_timeout(maybe_env("REQUEST_TIMEOUT")?)
            .maybe_max_blocking_threads(maybe_env("MAX_BLOCKING_THREADS")?)
            .build();

        ensure!(
            config.max_blocking_threads > 0,
            "PLUGINSTORE_MAX_BLOCKING_THREADS has to be at least 1"
        );

        Ok(config)
    }
}
