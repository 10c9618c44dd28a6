mod etag;
mod if_none_match;
#[cfg(test)]
mod testing;

pub use etag::{ETag, ETagComputer, compute_etag};
pub use if_none_match::IfNoneMatch;
