use crate::{
    cache::CachePolicy,
    config::Config,
    error::{StaticNope, StaticResult},
    extractors::{Path, RemoteAddr},
    file::{FileBody, file_exists, open_file_body, resolve_etag},
    namespace::ResolvedFile,
};
use axum::{
    body::{Body, Bytes},
    extract::Extension,
    response::{IntoResponse as _, Response as AxumResponse},
};
use axum_extra::{
    headers::{ContentLength, ContentType},
    typed_header::TypedHeader,
};
use futures_util::stream;
use http::StatusCode;
use mime::Mime;
use pluginstore_headers::{ETag, IfNoneMatch};
use pluginstore_mimes::detect_mime;
use std::{io, sync::Arc};
use tracing::{debug, instrument};

#[instrument(skip_all)]
pub(crate) async fn serve_requested_file(
    Path(requested_file): Path<String>,
    remote: RemoteAddr,
    Extension(config): Extension<Arc<Config>>,
    if_none_match: Option<TypedHeader<IfNoneMatch>>,
) -> StaticResult<AxumResponse> {
    let resolved = ResolvedFile::resolve(&config, &requested_file)?;
    serve(
        remote,
        &resolved,
        &requested_file,
        if_none_match.as_ref().map(|TypedHeader(value)| value),
    )
    .await
}

/// Answer a request for an already resolved file.
///
/// `LongLived` files are always sent in full, without an etag.
/// For `Revalidate` files the etag is computed from the current content on
/// every request and compared against `If-None-Match`.
pub(crate) async fn serve(
    remote: RemoteAddr,
    resolved: &ResolvedFile,
    requested_file: &str,
    if_none_match: Option<&IfNoneMatch>,
) -> StaticResult<AxumResponse> {
    let fs_error = |err: anyhow::Error| StaticNope::FileSystem {
        requested_file: requested_file.to_owned(),
        err,
    };
    let not_found = || StaticNope::ResourceNotFound {
        remote,
        path: resolved.path.clone(),
    };

    if !file_exists(&resolved.path).await.map_err(fs_error)? {
        return Err(not_found());
    }

    let mime = detect_mime(&resolved.path);

    if !resolved.cache_policy.uses_etag() {
        debug!(
            requested_file,
            namespace = ?resolved.namespace,
            path = %resolved.path.display(),
            "serving file without etag"
        );
        return full_content(resolved, mime, None).await.map_err(fs_error);
    }

    // the file can vanish between the existence check and hashing.
    let Some(etag) = resolve_etag(&resolved.path).await.map_err(fs_error)? else {
        return Err(not_found());
    };

    if let Some(if_none_match) = if_none_match
        && if_none_match.matches(&etag)
    {
        debug!(
            requested_file,
            namespace = ?resolved.namespace,
            path = %resolved.path.display(),
            %etag,
            "serving file with etag (not modified)"
        );
        return Ok(not_modified(mime));
    }

    debug!(
        requested_file,
        namespace = ?resolved.namespace,
        path = %resolved.path.display(),
        %etag,
        "serving file with etag (not cached)"
    );
    full_content(resolved, mime, Some(etag))
        .await
        .map_err(fs_error)
}

/// `304 Not Modified` keeps the content type, and nothing else.
///
/// No cache policy is attached, so the cache middleware adds no
/// `Cache-Control`. The stream body has no exact size, so no
/// `Content-Length: 0` gets added either.
fn not_modified(mime: Mime) -> AxumResponse {
    (
        StatusCode::NOT_MODIFIED,
        TypedHeader(ContentType::from(mime)),
        Body::from_stream(stream::empty::<io::Result<Bytes>>()),
    )
        .into_response()
}

async fn full_content(
    resolved: &ResolvedFile,
    mime: Mime,
    etag: Option<ETag>,
) -> anyhow::Result<AxumResponse> {
    let FileBody {
        content_length,
        body,
    } = open_file_body(&resolved.path).await?;

    Ok((
        StatusCode::OK,
        TypedHeader(ContentType::from(mime)),
        TypedHeader(ContentLength(content_length)),
        etag.map(TypedHeader),
        Extension::<CachePolicy>(resolved.cache_policy),
        body,
    )
        .into_response())
}
