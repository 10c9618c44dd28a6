mod cache;
mod config;
mod error;
mod extractors;
mod file;
mod handlers;
mod namespace;
mod routes;
#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use handlers::run_web_server;
