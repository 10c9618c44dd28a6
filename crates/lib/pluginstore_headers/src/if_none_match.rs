//! `If-None-Match` as a plain list of entity tags.
//!
//! `headers::IfNoneMatch` doesn't fit our conditional requests in two ways:
//!
//! 1. a _missing_ header decodes to an empty match list, so
//!    `Option<TypedHeader<headers::IfNoneMatch>>` is `Some` even when the
//!    client sent nothing.
//!    Some reading: https://github.com/hyperium/headers/issues/204
//! 2. it compares with the weak comparison function and treats `*` as a
//!    wildcard.
//!
//! This version fails to decode when the header is missing, keeps every
//! comma separated entry (trimmed) as-is, and matches by string equality.
//! Values that aren't visible ASCII are skipped, they can never match.

use crate::ETag;
use headers::{Error, Header};
use http::{HeaderName, HeaderValue, header};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IfNoneMatch(Vec<String>);

impl IfNoneMatch {
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `true` when one of the entries is exactly `etag`.
    pub fn matches(&self, etag: &ETag) -> bool {
        self.entries().any(|entry| entry == etag.as_str())
    }
}

impl Header for IfNoneMatch {
    fn name() -> &'static HeaderName {
        &header::IF_NONE_MATCH
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let mut values = values.peekable();

        // When there is no header in the request, decoding fails.
        // This makes `Option<TypedHeader<IfNoneMatch>>` return `None`.
        if values.peek().is_none() {
            return Err(Error::invalid());
        }

        Ok(IfNoneMatch(
            values
                .filter_map(|value| value.to_str().ok())
                .flat_map(|value| value.split(','))
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        ))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        values.extend(HeaderValue::from_str(&self.0.join(", ")).ok());
    }
}

impl From<ETag> for IfNoneMatch {
    fn from(value: ETag) -> Self {
        Self(vec![value.as_str().to_owned()])
    }
}

impl FromIterator<ETag> for IfNoneMatch {
    fn from_iter<T: IntoIterator<Item = ETag>>(iter: T) -> Self {
        Self(iter.into_iter().map(|etag| etag.as_str().to_owned()).collect())
    }
}
