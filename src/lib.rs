//! Stamp - HTTP conditional caching validation
//!
//! Fingerprints response bodies into ETags, attaches Cache-Control
//! directives and answers matching `If-None-Match` requests with
//! `304 Not Modified`. Stamp validates; it never stores responses.

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod fingerprint;
pub mod interceptor;
pub mod transport;

pub use directive::CacheDirectives;
pub use error::{StampError, StampResult};
pub use fingerprint::{Algorithm, Fingerprint};
pub use interceptor::{CachingDecision, CachingInterceptor, InterceptorConfig};
