use axum_extra::headers::{self, Header, HeaderMapExt as _};
use http::{HeaderMap, HeaderValue};

pub(crate) fn test_typed_decode<H, V>(value: V) -> Result<Option<H>, headers::Error>
where
    H: Header,
    V: TryInto<HeaderValue>,
    <V as TryInto<HeaderValue>>::Error: std::fmt::Debug,
{
    let mut map = HeaderMap::new();
    map.append(H::name(), value.try_into().unwrap());
    map.typed_try_get()
}
