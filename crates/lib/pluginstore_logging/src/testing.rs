use std::str::FromStr as _;
use tracing_subscriber::{EnvFilter, filter::Directive};

/// Install a subscriber that writes through the test harness, so log output
/// only shows up for failing tests.
pub fn init() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Directive::from_str("debug").unwrap())
                .with_env_var(crate::LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
