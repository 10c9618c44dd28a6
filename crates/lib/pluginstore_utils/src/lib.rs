use anyhow::Result;
use std::panic;
use tracing::Span;

/// a wrapper around tokio's `spawn_blocking` that
/// enables us to write nicer code when the closure
/// returns an `anyhow::Result`.
///
/// The join-error will also be converted into an `anyhow::Error`,
/// a panic in the closure is resumed on the awaiting task.
///
/// The closure runs on tokio's blocking pool, which is bounded by the
/// runtime's `max_blocking_threads`. If the awaiting future is dropped, the
/// closure still runs to completion and its result is discarded.
///
/// with standard `tokio::task::spawn_blocking`:
/// ```text,ignore
/// let etag = spawn_blocking(move || -> anyhow::Result<_> {
///     let etag = compute_file_etag(&path)?;
///     Ok(etag)
/// })
/// .await
/// .context("failed to join thread")??;
/// ```
///
/// with this helper function:
/// ```text,ignore
/// let etag = spawn_blocking(move || {
///     let etag = compute_file_etag(&path)?;
///     Ok(etag)
/// })
/// .await?
/// ```
pub async fn spawn_blocking<F, R>(f: F) -> Result<R>
where
    F: FnOnce() -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    let span = Span::current();

    let result = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        f()
    })
    .await;

    match result {
        Ok(result) => result,
        Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
        Err(err) => Err(err.into()),
    }
}
