use crate::extractors::RemoteAddr;
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use std::path::PathBuf;
use tracing::{error, warn};

/// Everything that can go wrong while serving a file.
///
/// Clients only ever see an empty `404 Not Found`, the details end up in
/// our logs.
#[derive(Debug, thiserror::Error)]
pub enum StaticNope {
    #[error("invalid requested path: {0}")]
    InvalidPath(String),
    #[error("{remote} tried to request '{}' but the file does not exist", path.display())]
    ResourceNotFound { remote: RemoteAddr, path: PathBuf },
    #[error("error trying to serve {requested_file}")]
    FileSystem {
        requested_file: String,
        err: anyhow::Error,
    },
}

impl IntoResponse for StaticNope {
    fn into_response(self) -> AxumResponse {
        match self {
            StaticNope::InvalidPath(ref detail) => warn!(%detail, "{self}"),
            StaticNope::ResourceNotFound {
                ref remote,
                ref path,
            } => error!(%remote, path = %path.display(), "{self}"),
            StaticNope::FileSystem {
                ref requested_file,
                ref err,
            } => error!(?err, %requested_file, "{self}"),
        }

        StatusCode::NOT_FOUND.into_response()
    }
}

impl From<PathRejection> for StaticNope {
    fn from(value: PathRejection) -> Self {
        StaticNope::InvalidPath(value.body_text())
    }
}

pub(crate) type StaticResult<T> = Result<T, StaticNope>;
