//! Capability impls for the `http` crate's request and response types
//!
//! Responses need a seekable body (e.g. `Cursor<Bytes>`) so the fingerprint
//! can be computed before transmission. `http` derives reason phrases from
//! the status code, so the phrase passed to `with_status` is not stored.

use super::{combine_field_lines, HttpRequest, HttpResponse};
use crate::error::{StampError, StampResult};
use ::http::{HeaderName, HeaderValue, Request, Response, StatusCode};
use std::borrow::Cow;
use std::io::{Read, Seek};
use tracing::trace;

impl<B: Send + Sync> HttpRequest for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    /// Values that are not visible ASCII are skipped
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        combine_field_lines(
            self.headers()
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        )
    }
}

impl<B: Read + Seek + Send> HttpResponse for Response<B> {
    type Body = B;

    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)?.to_str().ok()
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    fn with_header(mut self, name: &str, value: &str) -> StampResult<Self> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| StampError::invalid_header(name, value))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| StampError::invalid_header(name, value))?;
        self.headers_mut().insert(header_name, header_value);
        Ok(self)
    }

    fn without_header(mut self, name: &str) -> Self {
        self.headers_mut().remove(name);
        self
    }

    fn with_status(mut self, code: u16, reason: &str) -> StampResult<Self> {
        let status = StatusCode::from_u16(code)
            .map_err(|_| StampError::User(format!("Invalid status code: {}", code)))?;
        trace!("Status {} ({}) set on http::Response", code, reason);
        *self.status_mut() = status;
        Ok(self)
    }

    fn body_mut(&mut self) -> &mut Self::Body {
        Response::body_mut(self)
    }
}
