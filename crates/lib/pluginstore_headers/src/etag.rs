use derive_more::Display;
use headers::{Error, Header};
use http::{HeaderName, HeaderValue, header};
use std::{fmt, io, str::FromStr};

/// An entity tag, kept as the exact quoted string that goes on the wire.
///
/// Unlike `headers::ETag` this type has no notion of weak or strong
/// comparison: two tags are equal when their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct ETag(String);

impl ETag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct InvalidETag(String);

impl fmt::Display for InvalidETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid entity tag: {}", self.0)
    }
}

impl std::error::Error for InvalidETag {}

// etagc = %x21 / %x23-7E
fn is_etagc(b: u8) -> bool {
    b == 0x21 || (0x23..=0x7e).contains(&b)
}

impl FromStr for ETag {
    type Err = InvalidETag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let opaque = s.strip_prefix("W/").unwrap_or(s);
        let valid = opaque.len() >= 2
            && opaque.starts_with('"')
            && opaque.ends_with('"')
            && opaque[1..opaque.len() - 1].bytes().all(is_etagc);

        if valid {
            Ok(ETag(s.to_owned()))
        } else {
            Err(InvalidETag(s.to_owned()))
        }
    }
}

impl Header for ETag {
    fn name() -> &'static HeaderName {
        &header::ETAG
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .ok_or_else(Error::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        // only visible ASCII passes `from_str`, so this can't be empty.
        values.extend(HeaderValue::from_str(&self.0).ok());
    }
}

/// compute our etag header value from some content
pub fn compute_etag<T: AsRef<[u8]>>(content: T) -> ETag {
    let mut computer = ETagComputer::new();
    computer.consume(content);
    computer.finalize()
}

/// Helper type to compute ETag values.
///
/// Works the same way as the inner `md5::Context`,
/// but produces an `ETag` when finalized. The digest is stable across
/// processes and machines, so clients can keep using a tag after a restart.
#[derive(Default)]
pub struct ETagComputer(md5::Context);

impl ETagComputer {
    pub fn new() -> Self {
        Self(md5::Context::new())
    }

    pub fn consume<T: AsRef<[u8]>>(&mut self, data: T) {
        self.0.consume(data.as_ref());
    }

    pub fn finalize(self) -> ETag {
        let digest = self.0.finalize();
        ETag(format!("\"0x{digest:x}\""))
    }
}

impl io::Write for ETagComputer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
