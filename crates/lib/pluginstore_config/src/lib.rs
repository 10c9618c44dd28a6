mod env;

pub use env::{env, maybe_env, require_env};

use anyhow::Result;

/// The main config trait for an application or library config.
///
/// Used by the logging crate and the web server binary.
pub trait AppConfig: Sized {
    fn from_environment() -> Result<Self>;

    #[cfg(feature = "testing")]
    fn test_config() -> Result<Self> {
        Self::from_environment()
    }
}
