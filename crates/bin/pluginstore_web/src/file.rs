//! File system access for the static responder.
//!
//! Everything blocking runs on the blocking pool, never on the request task.
use anyhow::{Context as _, Result};
use axum::body::Body;
use pluginstore_headers::{ETag, ETagComputer};
use pluginstore_utils::spawn_blocking;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tokio_util::io::ReaderStream;

/// `true` when `path` is a regular file.
pub(crate) async fn file_exists(path: &Path) -> Result<bool> {
    let path = path.to_owned();
    spawn_blocking(move || Ok(path.is_file())).await
}

fn compute_file_etag(path: &Path) -> io::Result<ETag> {
    let mut file = fs::File::open(path)?;
    let mut computer = ETagComputer::new();
    io::copy(&mut file, &mut computer)?;
    Ok(computer.finalize())
}

/// Compute the etag over the full content of the file at `path`.
///
/// Returns `None` when there is no such file. Every other I/O error
/// (permissions, `path` being a directory, ...) is returned as error.
pub(crate) async fn resolve_etag(path: &Path) -> Result<Option<ETag>> {
    let path: PathBuf = path.to_owned();
    spawn_blocking(move || match compute_file_etag(&path) {
        Ok(etag) => Ok(Some(etag)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("couldn't compute etag for {}", path.display()))
        }
    })
    .await
}

pub(crate) struct FileBody {
    pub(crate) content_length: u64,
    pub(crate) body: Body,
}

/// Open the file and stream its content as response body.
pub(crate) async fn open_file_body(path: &Path) -> Result<FileBody> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("couldn't open {}", path.display()))?;
    let content_length = file
        .metadata()
        .await
        .with_context(|| format!("couldn't read metadata of {}", path.display()))?
        .len();

    Ok(FileBody {
        content_length,
        body: Body::from_stream(ReaderStream::new(file)),
    })
}
