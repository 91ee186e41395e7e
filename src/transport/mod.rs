//! Request/response abstraction consumed by the interceptor
//!
//! The interceptor never owns a transport. It works against these traits,
//! which are implemented for the in-memory [`SimpleRequest`]/[`SimpleResponse`]
//! pair and for the `http` crate's `Request`/`Response` types.

pub mod http_compat;
pub mod memory;

pub use memory::{SimpleRequest, SimpleResponse};

use crate::error::StampResult;
use async_trait::async_trait;
use std::borrow::Cow;
use std::io::{Read, Seek};

/// Conditional request header carrying the client's fingerprints
pub const IF_NONE_MATCH: &str = "If-None-Match";
/// Response fingerprint header
pub const ETAG: &str = "ETag";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Inbound request capabilities
pub trait HttpRequest: Send + Sync {
    /// Request method as sent by the client (case not normalized)
    fn method(&self) -> &str;

    /// Header value by case-insensitive name.
    ///
    /// Repeated field lines are combined into one value joined with `", "`.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Separator for combining repeated header field lines
pub const FIELD_SEPARATOR: &str = ", ";

/// Combine field line values into one header value, borrowing when there is
/// only one line
pub(crate) fn combine_field_lines<'a>(
    mut values: impl Iterator<Item = &'a str>,
) -> Option<Cow<'a, str>> {
    let first = values.next()?;
    let Some(second) = values.next() else {
        return Some(Cow::Borrowed(first));
    };

    let mut joined = format!("{}{}{}", first, FIELD_SEPARATOR, second);
    for value in values {
        joined.push_str(FIELD_SEPARATOR);
        joined.push_str(value);
    }
    Some(Cow::Owned(joined))
}

/// Outbound response capabilities
///
/// Header mutation consumes the response and returns the updated one.
pub trait HttpResponse: Sized + Send {
    type Body: Read + Seek;

    fn status_code(&self) -> u16;

    /// Header value by case-insensitive name
    fn header(&self, name: &str) -> Option<&str>;

    fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Set a header, replacing any existing value
    fn with_header(self, name: &str, value: &str) -> StampResult<Self>;

    fn without_header(self, name: &str) -> Self;

    fn with_status(self, code: u16, reason: &str) -> StampResult<Self>;

    fn body_mut(&mut self) -> &mut Self::Body;
}

/// Downstream handler producing responses
#[async_trait]
pub trait Handler: Send + Sync {
    type Request: HttpRequest;
    type Response: HttpResponse;

    async fn handle(&self, request: &Self::Request) -> StampResult<Self::Response>;
}
