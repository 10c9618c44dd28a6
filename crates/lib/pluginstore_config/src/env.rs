//! Typed access to `PLUGINSTORE_*` environment variables.
//!
//! All helpers take the variable name without the prefix, so
//! `maybe_env::<u64>("REQUEST_TIMEOUT")` reads `PLUGINSTORE_REQUEST_TIMEOUT`.
//! Names that already carry a foreign prefix (like `SENTRY_DSN`) can be
//! passed with a leading `!` to skip prefixing.

use anyhow::{Context as _, Result, anyhow};
use std::{borrow::Cow, env::VarError, error::Error, str::FromStr};
use tracing::trace;

pub(crate) const ENV_PREFIX: &str = "PLUGINSTORE_";

fn full_name(var: &str) -> Cow<'_, str> {
    match var.strip_prefix('!') {
        Some(unprefixed) => Cow::Borrowed(unprefixed),
        None => Cow::Owned(format!("{ENV_PREFIX}{var}")),
    }
}

pub fn env<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    Ok(maybe_env(var)?.unwrap_or(default))
}

pub fn require_env<T>(var: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Error + Send + Sync + 'static,
{
    maybe_env(var)?.with_context(|| anyhow!("configuration variable {} is missing", full_name(var)))
}

pub fn maybe_env<T>(var: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    let name = full_name(var);
    match std::env::var(name.as_ref()) {
        Ok(content) => Ok(content
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("failed to parse configuration variable {name}"))?),
        Err(VarError::NotPresent) => {
            trace!("optional configuration variable {} is not set", name);
            Ok(None)
        }
        Err(VarError::NotUnicode(_)) => {
            Err(anyhow!("configuration variable {} is not UTF-8", name))
        }
    }
}
