//! Conditional caching interceptor
//!
//! Wraps a downstream [`Handler`], annotates eligible responses with
//! `Cache-Control` and `ETag`, and turns responses whose fingerprint matches
//! the request's `If-None-Match` into `304 Not Modified`.
//!
//! # Request flow
//!
//! | Step | Check | On failure |
//! |------|-------|------------|
//! | 1 | interceptor enabled | forward unchanged |
//! | 2 | method cacheable | forward unchanged |
//! | 3 | run downstream handler | propagate error |
//! | 4 | status cacheable | return unchanged |
//! | 5 | attach default `Cache-Control` if absent | |
//! | 6 | attach `ETag` if absent | propagate error |
//! | 7 | evaluate `If-None-Match` | return annotated response |
//!
//! The downstream handler always runs for cacheable methods: the body must
//! exist before it can be fingerprinted.

use crate::directive::CacheDirectives;
use crate::error::StampResult;
use crate::fingerprint::{self, compute_fingerprint, Algorithm};
use crate::transport::{
    Handler, HttpRequest, HttpResponse, CACHE_CONTROL, CONTENT_LENGTH, ETAG, IF_NONE_MATCH,
};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace, warn};

/// Methods eligible for annotation when none are configured
pub const DEFAULT_CACHEABLE_METHODS: &[&str] = &["GET", "HEAD"];

/// Statuses eligible for annotation when none are configured
pub const DEFAULT_CACHEABLE_STATUSES: &[u16] =
    &[200, 203, 204, 206, 300, 301, 404, 405, 410, 414, 501];

/// Wildcard `If-None-Match` value matching any fingerprint
pub const WILDCARD: &str = "*";

/// Outcome of evaluating one request/response pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachingDecision {
    /// Response forwarded untouched
    PassThrough,
    /// Headers attached, body forwarded
    Annotate,
    /// Body suppressed, status overridden to 304
    NotModified,
}

impl fmt::Display for CachingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PassThrough => "pass-through",
            Self::Annotate => "annotate",
            Self::NotModified => "not-modified",
        };
        write!(f, "{}", name)
    }
}

/// Interceptor settings, fixed at construction
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    pub enabled: bool,
    pub default_directives: Option<CacheDirectives>,
    pub use_weak_fingerprint: bool,
    pub algorithm: Algorithm,
    /// Uppercase method names
    pub cacheable_methods: BTreeSet<String>,
    pub cacheable_statuses: BTreeSet<u16>,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_directives: None,
            use_weak_fingerprint: false,
            algorithm: Algorithm::Md5,
            cacheable_methods: DEFAULT_CACHEABLE_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            cacheable_statuses: DEFAULT_CACHEABLE_STATUSES.iter().copied().collect(),
        }
    }
}

/// Stateless per-request caching validation
#[derive(Debug, Clone, Default)]
pub struct CachingInterceptor {
    config: InterceptorConfig,
}

impl CachingInterceptor {
    pub fn new(config: InterceptorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Wrap a handler so the interceptor runs around every request
    pub fn layer<H: Handler>(self, inner: H) -> CachingLayer<H> {
        CachingLayer {
            interceptor: self,
            inner,
        }
    }

    /// Process one request through `handler`
    pub async fn handle<H: Handler>(
        &self,
        request: &H::Request,
        handler: &H,
    ) -> StampResult<H::Response> {
        let (response, _) = self.evaluate(request, handler).await?;
        Ok(response)
    }

    /// Process one request, also reporting which decision was taken
    pub async fn evaluate<H: Handler>(
        &self,
        request: &H::Request,
        handler: &H,
    ) -> StampResult<(H::Response, CachingDecision)> {
        if !self.config.enabled {
            trace!("Caching disabled, forwarding request");
            let response = handler.handle(request).await?;
            return Ok((response, CachingDecision::PassThrough));
        }

        let method = request.method().to_ascii_uppercase();
        if !self.config.cacheable_methods.contains(&method) {
            debug!("Method {} not cacheable, forwarding request", method);
            let response = handler.handle(request).await?;
            return Ok((response, CachingDecision::PassThrough));
        }

        let response = handler.handle(request).await?;

        let status = response.status_code();
        if !self.config.cacheable_statuses.contains(&status) {
            debug!("Status {} not cacheable, skipping annotation", status);
            return Ok((response, CachingDecision::PassThrough));
        }

        let response = self.annotate(response)?;

        let etag = response
            .header(ETAG)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let Some(etag) = etag else {
            return Ok((response, CachingDecision::Annotate));
        };

        let matched = request
            .header(IF_NONE_MATCH)
            .is_some_and(|header| if_none_match_matches(&header, &etag));

        if !matched {
            debug!("{} {} -> {} ({})", method, status, etag, CachingDecision::Annotate);
            return Ok((response, CachingDecision::Annotate));
        }

        debug!("{} {} -> {} ({})", method, status, etag, CachingDecision::NotModified);
        let response = response
            .with_status(304, "Not Modified")?
            .without_header(CONTENT_LENGTH);

        Ok((response, CachingDecision::NotModified))
    }

    /// Attach `Cache-Control` and `ETag` where the response has none
    fn annotate<R: HttpResponse>(&self, mut response: R) -> StampResult<R> {
        if !response.has_header(CACHE_CONTROL) {
            if let Some(directives) = &self.config.default_directives {
                response = response.with_header(CACHE_CONTROL, &directives.render())?;
            }
        }

        if !response.has_header(ETAG) {
            let fingerprint = compute_fingerprint(
                response.body_mut(),
                self.config.algorithm,
                self.config.use_weak_fingerprint,
            )
            .inspect_err(|e| warn!("Fingerprinting response body failed: {}", e))?;
            trace!("Computed fingerprint {}", fingerprint);
            response = response.with_header(ETAG, &fingerprint.to_string())?;
        }

        Ok(response)
    }
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Empty values never match, `*` always matches, and comma-separated lists
/// match if any entry matches. Entries are compared with weak semantics.
pub fn if_none_match_matches(header: &str, etag: &str) -> bool {
    let header = header.trim();
    if header.is_empty() {
        return false;
    }
    if header == WILDCARD {
        return true;
    }

    if header.contains(',') {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| fingerprint::matches(candidate, etag, true))
    } else {
        fingerprint::matches(header, etag, true)
    }
}

/// A handler wrapped by a [`CachingInterceptor`]
#[derive(Debug, Clone)]
pub struct CachingLayer<H> {
    interceptor: CachingInterceptor,
    inner: H,
}

impl<H> CachingLayer<H> {
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

#[async_trait]
impl<H: Handler> Handler for CachingLayer<H> {
    type Request = H::Request;
    type Response = H::Response;

    async fn handle(&self, request: &Self::Request) -> StampResult<Self::Response> {
        self.interceptor.handle(request, &self.inner).await
    }
}
