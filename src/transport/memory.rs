//! In-memory request and response
//!
//! Headers keep insertion order and compare names case-insensitively.
//! The response body is a cursor over owned bytes.

use super::{combine_field_lines, HttpRequest, HttpResponse, CONTENT_LENGTH};
use crate::error::{StampError, StampResult};
use std::borrow::Cow;
use std::io::{self, Cursor, Write};

fn find<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Request with a method and a header list
#[derive(Debug, Clone)]
pub struct SimpleRequest {
    method: String,
    headers: Vec<(String, String)>,
}

impl SimpleRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            headers: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new("GET")
    }

    /// Add a header (builder style)
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl HttpRequest for SimpleRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        combine_field_lines(
            self.headers
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
        )
    }
}

/// Response with status, reason phrase, headers and a seekable body
#[derive(Debug, Clone)]
pub struct SimpleResponse {
    status: u16,
    reason: String,
    headers: Vec<(String, String)>,
    body: Cursor<Vec<u8>>,
}

impl SimpleResponse {
    /// Create a response; `Content-Length` is set from the body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status,
            reason: default_reason(status).to_string(),
            headers: vec![(CONTENT_LENGTH.to_string(), body.len().to_string())],
            body: Cursor::new(body),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// Set a header (builder style)
    pub fn set_header(self, name: &str, value: &str) -> Self {
        self.set(name, value)
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Full body bytes, independent of the read position
    pub fn body_bytes(&self) -> &[u8] {
        self.body.get_ref()
    }

    /// Whether the wire message carries a body
    pub fn carries_body(&self) -> bool {
        !matches!(self.status, 204 | 304)
    }

    /// Write the response as an HTTP/1.1 message.
    ///
    /// The body is copied from the current read position.
    pub fn transmit<W: Write>(&mut self, out: &mut W) -> io::Result<u64> {
        write!(out, "HTTP/1.1 {} {}\r\n", self.status, self.reason)?;
        for (name, value) in &self.headers {
            write!(out, "{}: {}\r\n", name, value)?;
        }
        out.write_all(b"\r\n")?;

        if !self.carries_body() {
            return Ok(0);
        }
        io::copy(&mut self.body, out)
    }

    fn set(mut self, name: &str, value: &str) -> Self {
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        self
    }
}

impl HttpResponse for SimpleResponse {
    type Body = Cursor<Vec<u8>>;

    fn status_code(&self) -> u16 {
        self.status
    }

    fn header(&self, name: &str) -> Option<&str> {
        find(&self.headers, name)
    }

    fn with_header(self, name: &str, value: &str) -> StampResult<Self> {
        if value.contains(['\r', '\n']) {
            return Err(StampError::invalid_header(name, value));
        }
        Ok(self.set(name, value))
    }

    fn without_header(mut self, name: &str) -> Self {
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self
    }

    fn with_status(mut self, code: u16, reason: &str) -> StampResult<Self> {
        if !(100..=999).contains(&code) {
            return Err(StampError::User(format!("Invalid status code: {}", code)));
        }
        self.status = code;
        self.reason = reason.to_string();
        Ok(self)
    }

    fn body_mut(&mut self) -> &mut Self::Body {
        &mut self.body
    }
}

fn default_reason(status: u16) -> &'static str {
    ::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
}
