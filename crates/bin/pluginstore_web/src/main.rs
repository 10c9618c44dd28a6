use anyhow::Context as _;
use clap::Parser;
use pluginstore_config::AppConfig as _;
use pluginstore_web::{Config, run_web_server};
use std::{net::SocketAddr, sync::Arc};

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version,
    rename_all = "kebab-case",
)]
struct Cli {
    #[arg(name = "SOCKET_ADDR", default_value = "0.0.0.0:3000")]
    socket_addr: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    let logging_config = pluginstore_logging::Config::from_environment()?;
    let _guard = pluginstore_logging::init(&logging_config).context("error initializing logging")?;

    let args = Cli::parse();
    let config = Arc::new(Config::from_environment()?);

    // file system work runs on the blocking pool, keep it bounded.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(config.max_blocking_threads())
        .build()
        .context("failed to initialize runtime")?;

    runtime.block_on(run_web_server(Some(args.socket_addr), config))?;

    Ok(())
}
