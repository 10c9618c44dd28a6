//! HTTP server for plugin store files

pub(crate) mod statics;

use crate::{Config, cache, routes};
use anyhow::{Context as _, Result};
use axum::{
    Router as AxumRouter,
    extract::{Extension, MatchedPath, Request as AxumRequest},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse as _, Response as AxumResponse},
};
use axum_extra::middleware::option_layer;
use sentry::integrations::tower as sentry_tower;
use std::{
    any::Any,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, instrument};

const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 3000);

async fn log_timeouts(req: AxumRequest, next: Next) -> AxumResponse {
    let uri = req.uri().clone();

    let response = next.run(req).await;

    if response.status() == StatusCode::REQUEST_TIMEOUT {
        error!(?uri, "request timeout");
    }

    response
}

async fn set_sentry_transaction_name_from_axum_route(
    request: AxumRequest,
    next: Next,
) -> AxumResponse {
    let route_name = if let Some(path) = request.extensions().get::<MatchedPath>() {
        path.as_str()
    } else {
        request.uri().path()
    };

    sentry::configure_scope(|scope| {
        scope.set_transaction(Some(route_name));
    });

    next.run(request).await
}

/// a panicking handler is answered like every other failure.
fn panic_to_not_found(err: Box<dyn Any + Send + 'static>) -> AxumResponse {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(%detail, "handler panicked");

    StatusCode::NOT_FOUND.into_response()
}

fn apply_middleware(router: AxumRouter, config: Arc<Config>) -> AxumRouter {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(sentry_tower::NewSentryLayer::new_from_top())
            .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
            .layer(middleware::from_fn(
                set_sentry_transaction_name_from_axum_route,
            ))
            .layer(CatchPanicLayer::custom(panic_to_not_found))
            .layer(option_layer(
                config
                    .request_timeout
                    .map(|_| middleware::from_fn(log_timeouts)),
            ))
            .layer(option_layer(config.request_timeout.map(|to| {
                TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, to)
            })))
            .layer(Extension(config.clone()))
            .layer(middleware::from_fn(cache::cache_middleware)),
    )
}

pub(crate) fn build_axum_app(config: Arc<Config>) -> AxumRouter {
    apply_middleware(routes::build_axum_routes(), config)
}

#[instrument(skip_all)]
pub async fn run_web_server(addr: Option<SocketAddr>, config: Arc<Config>) -> Result<()> {
    let axum_addr = addr.unwrap_or(DEFAULT_BIND);

    info!(
        config_root = %config.config_root.display(),
        "Starting web server on `{}:{}`",
        axum_addr.ip(),
        axum_addr.port()
    );

    // connect-info gives handlers the remote address for logging.
    let app = build_axum_app(config).into_make_service_with_connect_info::<SocketAddr>();
    let listener = tokio::net::TcpListener::bind(axum_addr)
        .await
        .context("error binding socket for web server")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(?err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(?err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}
