//! custom axum extractors
use crate::error::StaticNope;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use std::{convert::Infallible, fmt, net::SocketAddr};

/// custom axum `Path` extractor that uses our own `StaticNope::InvalidPath`
/// as error response instead of a plain text "bad request"
mod path_impl {
    use super::*;

    #[derive(FromRequestParts)]
    #[from_request(via(axum::extract::Path), rejection(StaticNope))]
    pub(crate) struct Path<T>(pub T);
}

pub(crate) use path_impl::Path;

/// Address of the client, when the server was started with connect-info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub Option<SocketAddr>);

impl fmt::Display for RemoteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(f, "{addr}"),
            None => f.write_str("<unknown>"),
        }
    }
}

impl<S> FromRequestParts<S> for RemoteAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RemoteAddr(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
        ))
    }
}
