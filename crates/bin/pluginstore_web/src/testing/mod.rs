pub(crate) mod headers;

use crate::{Config, handlers::build_axum_app};
use anyhow::Result;
use axum::{
    Router,
    body::{Body, Bytes},
    extract::Request,
    response::Response as AxumResponse,
};
use http::{HeaderMap, HeaderValue, StatusCode, header::CACHE_CONTROL};
use http_body_util::BodyExt as _;
use std::{
    fs, io,
    path::Path,
    sync::{Arc, Mutex},
};
use tempfile::TempDir;
use tower::ServiceExt as _;
use tracing::subscriber::DefaultGuard;

/// A config root in a temporary directory, with the `themes` and
/// `www/community` directories already created.
pub(crate) struct TestEnvironment {
    root: TempDir,
    config: Arc<Config>,
}

impl TestEnvironment {
    pub(crate) fn new() -> Result<Self> {
        Self::with_config(|root| Config::builder().config_root(root).build())
    }

    pub(crate) fn with_config(f: impl FnOnce(&Path) -> Config) -> Result<Self> {
        pluginstore_logging::testing::init();

        let root = tempfile::tempdir()?;
        fs::create_dir_all(root.path().join("themes"))?;
        fs::create_dir_all(root.path().join("www").join("community"))?;

        let config = Arc::new(f(root.path()));
        Ok(Self { root, config })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    fn write_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<()> {
        let path = self.root().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// `name` is relative to `themes/`.
    pub(crate) fn write_theme_file(&self, name: &str, content: impl AsRef<[u8]>) -> Result<()> {
        self.write_file(Path::new("themes").join(name), content)
    }

    /// `name` is relative to `www/community/`.
    pub(crate) fn write_community_file(
        &self,
        name: &str,
        content: impl AsRef<[u8]>,
    ) -> Result<()> {
        self.write_file(Path::new("www").join("community").join(name), content)
    }

    pub(crate) fn web_app(&self) -> Router {
        build_axum_app(self.config.clone())
    }
}

pub(crate) trait AxumRouterTestExt {
    async fn get(&self, path: &str) -> Result<AxumResponse>;
    async fn get_with_headers(
        &self,
        path: &str,
        f: impl FnOnce(&mut HeaderMap),
    ) -> Result<AxumResponse>;
}

impl AxumRouterTestExt for Router {
    async fn get(&self, path: &str) -> Result<AxumResponse> {
        self.get_with_headers(path, |_| {}).await
    }

    async fn get_with_headers(
        &self,
        path: &str,
        f: impl FnOnce(&mut HeaderMap),
    ) -> Result<AxumResponse> {
        let mut request = Request::builder().uri(path).body(Body::empty())?;
        f(request.headers_mut());
        Ok(self.clone().oneshot(request).await?)
    }
}

pub(crate) trait AxumResponseTestExt {
    async fn bytes(self) -> Result<Bytes>;
    fn assert_cache_control(&self, expected: Option<&'static str>);
}

impl AxumResponseTestExt for AxumResponse {
    async fn bytes(self) -> Result<Bytes> {
        Ok(self.into_body().collect().await?.to_bytes())
    }

    fn assert_cache_control(&self, expected: Option<&'static str>) {
        assert!(self.status().is_success() || expected.is_none());
        pretty_assertions::assert_eq!(
            self.headers().get(CACHE_CONTROL),
            expected.map(HeaderValue::from_static).as_ref(),
        );
    }
}

pub(crate) fn assert_not_found(response: &AxumResponse) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    response.assert_cache_control(None);
}

/// Collects the formatted log output of the current thread while the
/// returned guard is alive.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(crate) fn start() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        (logs, tracing::subscriber::set_default(subscriber))
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// the first line at `level` that contains all of `needles`.
    pub(crate) fn find_line(&self, level: &str, needles: &[&str]) -> Option<String> {
        self.contents()
            .lines()
            .find(|line| line.contains(level) && needles.iter().all(|n| line.contains(n)))
            .map(ToOwned::to_owned)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
