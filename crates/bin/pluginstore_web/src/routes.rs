use crate::handlers::statics;
use axum::{Router as AxumRouter, routing::get};

pub(crate) fn build_axum_routes() -> AxumRouter {
    AxumRouter::new().route(
        "/storefiles/{*requested_file}",
        get(statics::serve_requested_file),
    )
}
