use crate::config::Config;
use axum::{
    Extension, extract::Request as AxumHttpRequest, middleware::Next,
    response::Response as AxumResponse,
};
use http::{
    HeaderMap, HeaderValue, StatusCode,
    header::{CACHE_CONTROL, ETAG},
};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCacheHeaders {
    pub cache_control: Option<HeaderValue>,
}

impl ResponseCacheHeaders {
    fn set_on_response(self, headers: &mut HeaderMap) {
        if let Some(cache_control) = self.cache_control {
            headers.insert(CACHE_CONTROL, cache_control);
        }
    }
}

/// Browsers may store the file, but always revalidate using
/// `If-None-Match` (with the etag) before using it.
static REVALIDATE: ResponseCacheHeaders = ResponseCacheHeaders {
    cache_control: Some(HeaderValue::from_static("no-cache")),
};

/// defines the wanted caching behaviour for a served file.
///
/// Handlers attach the policy as a response extension, `cache_middleware`
/// turns it into headers. Responses without a policy (errors, `304 Not
/// Modified`) are sent without caching headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CachePolicy {
    /// cache in browsers & proxies for `Config::long_lived_max_age`,
    /// without asking the server again.
    /// Responses don't carry an etag.
    LongLived,
    /// no reuse without revalidation.
    /// Responses carry an etag so revalidation can end in a
    /// `304 Not Modified` instead of the full file.
    Revalidate,
}

impl CachePolicy {
    pub fn render(self, config: &Config) -> anyhow::Result<ResponseCacheHeaders> {
        Ok(match self {
            CachePolicy::LongLived => ResponseCacheHeaders {
                cache_control: Some(
                    format!("public, max-age={}", config.long_lived_max_age).parse()?,
                ),
            },
            CachePolicy::Revalidate => REVALIDATE.clone(),
        })
    }

    /// whether files served with this policy get an etag and answer
    /// conditional requests.
    pub fn uses_etag(self) -> bool {
        matches!(self, CachePolicy::Revalidate)
    }
}

pub(crate) async fn cache_middleware(
    Extension(config): Extension<Arc<Config>>,
    req: AxumHttpRequest,
    next: Next,
) -> AxumResponse {
    let mut response = next.run(req).await;

    debug_assert!(
        !response.headers().contains_key(CACHE_CONTROL),
        "handlers should never set their own caching headers and only use CachePolicy to control caching. \n{:?}",
        response.headers(),
    );

    debug_assert!(
        response.status() == StatusCode::NOT_MODIFIED
            || response.status().is_success()
            || !response.headers().contains_key(ETAG),
        "only successful or not-modified responses should have etags. \n{:?}\n{:?}",
        response.status(),
        response.headers(),
    );

    let Some(cache_policy) = response.extensions_mut().remove::<CachePolicy>() else {
        return response;
    };

    match cache_policy.render(&config) {
        Ok(headers) => headers.set_on_response(response.headers_mut()),
        Err(err) => error!(?err, %cache_policy, "couldn't render cache headers for policy"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::headers::test_typed_decode;
    use anyhow::Result;
    use axum::{Router, body::Body, middleware, response::IntoResponse, routing::get};
    use axum_extra::headers::CacheControl;
    use http::Request;
    use std::time::Duration;
    use test_case::test_case;
    use tower::ServiceExt as _;

    fn config() -> Config {
        Config::builder().config_root("/config").build()
    }

    #[test]
    fn render_long_lived() -> Result<()> {
        let headers = CachePolicy::LongLived.render(&config())?;

        assert_eq!(
            headers.cache_control,
            Some(HeaderValue::from_static("public, max-age=2678400"))
        );

        let parsed: CacheControl = test_typed_decode(headers.cache_control.unwrap())?.unwrap();
        assert!(parsed.public());
        assert_eq!(parsed.max_age(), Some(Duration::from_secs(2_678_400)));

        Ok(())
    }

    #[test]
    fn render_long_lived_with_configured_max_age() -> Result<()> {
        let config = Config::builder()
            .config_root("/config")
            .long_lived_max_age(60)
            .build();

        assert_eq!(
            CachePolicy::LongLived.render(&config)?.cache_control,
            Some(HeaderValue::from_static("public, max-age=60"))
        );

        Ok(())
    }

    #[test]
    fn render_revalidate() -> Result<()> {
        let headers = CachePolicy::Revalidate.render(&config())?;

        assert_eq!(headers.cache_control, Some(HeaderValue::from_static("no-cache")));

        let parsed: CacheControl = test_typed_decode(headers.cache_control.unwrap())?.unwrap();
        assert!(parsed.no_cache());

        Ok(())
    }

    #[test_case(CachePolicy::LongLived, false)]
    #[test_case(CachePolicy::Revalidate, true)]
    fn uses_etag(policy: CachePolicy, expected: bool) {
        assert_eq!(policy.uses_etag(), expected);
    }

    #[test_case("long-lived", CachePolicy::LongLived)]
    #[test_case("revalidate", CachePolicy::Revalidate)]
    fn parse_policy(input: &str, expected: CachePolicy) {
        assert_eq!(input.parse::<CachePolicy>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn parse_unknown_policy() {
        assert!("forever".parse::<CachePolicy>().is_err());
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/long-lived",
                get(|| async { (Extension(CachePolicy::LongLived), "content") }),
            )
            .route(
                "/revalidate",
                get(|| async { (Extension(CachePolicy::Revalidate), "content") }),
            )
            .route(
                "/no-policy",
                get(|| async { StatusCode::NOT_FOUND.into_response() }),
            )
            .layer(middleware::from_fn(cache_middleware))
            .layer(Extension(Arc::new(config())))
    }

    async fn cache_control_for(path: &str) -> Result<Option<HeaderValue>> {
        let response = app()
            .oneshot(Request::builder().uri(path).body(Body::empty())?)
            .await?;

        assert!(response.extensions().get::<CachePolicy>().is_none());
        Ok(response.headers().get(CACHE_CONTROL).cloned())
    }

    #[tokio::test]
    async fn middleware_renders_policy() -> Result<()> {
        assert_eq!(
            cache_control_for("/long-lived").await?,
            Some(HeaderValue::from_static("public, max-age=2678400"))
        );
        assert_eq!(
            cache_control_for("/revalidate").await?,
            Some(HeaderValue::from_static("no-cache"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn middleware_without_policy_sets_nothing() -> Result<()> {
        assert!(cache_control_for("/no-policy").await?.is_none());
        assert!(cache_control_for("/route-that-does-not-exist").await?.is_none());
        Ok(())
    }
}
