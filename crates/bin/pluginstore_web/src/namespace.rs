//! Maps a requested file onto a location on disk and a cache policy.
use crate::{
    cache::CachePolicy,
    config::Config,
    error::{StaticNope, StaticResult},
};
use std::path::{Component, Path, PathBuf};

const THEMES_PREFIX: &str = "themes/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Namespace {
    /// `themes/...`, served from the config root.
    Themes,
    /// everything else, served from `www/community` below the config root.
    Community,
}

impl Namespace {
    pub(crate) fn classify(requested_file: &str) -> Self {
        if requested_file.starts_with(THEMES_PREFIX) {
            Namespace::Themes
        } else {
            Namespace::Community
        }
    }

    fn base_dir(self, config: &Config) -> PathBuf {
        match self {
            Namespace::Themes => config.config_root.clone(),
            Namespace::Community => config.config_root.join("www").join("community"),
        }
    }

    fn cache_policy(self, config: &Config) -> CachePolicy {
        match self {
            Namespace::Themes => config.themes_cache_policy,
            Namespace::Community => config.community_cache_policy,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedFile {
    pub(crate) namespace: Namespace,
    pub(crate) path: PathBuf,
    pub(crate) cache_policy: CachePolicy,
}

impl ResolvedFile {
    /// Resolve a requested file below its namespace directory.
    ///
    /// Only plain path segments are accepted, so the result can never
    /// point outside of the namespace directory.
    pub(crate) fn resolve(config: &Config, requested_file: &str) -> StaticResult<Self> {
        let relative = Path::new(requested_file);

        if requested_file.is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(StaticNope::InvalidPath(requested_file.to_owned()));
        }

        let namespace = Namespace::classify(requested_file);
        Ok(ResolvedFile {
            namespace,
            path: namespace.base_dir(config).join(relative),
            cache_policy: namespace.cache_policy(config),
        })
    }
}
