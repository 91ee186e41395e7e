//! Configuration schema for Stamp
//!
//! Configuration is stored at `~/.config/stamp/config.toml`

use crate::directive::CacheDirectives;
use crate::error::StampResult;
use crate::fingerprint::Algorithm;
use crate::interceptor::{
    InterceptorConfig, DEFAULT_CACHEABLE_METHODS, DEFAULT_CACHEABLE_STATUSES,
};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conditional caching settings
    pub caching: CachingConfig,
}

impl Config {
    /// Build the interceptor settings, validating the algorithm name
    pub fn interceptor_config(&self) -> StampResult<InterceptorConfig> {
        self.caching.to_interceptor_config()
    }
}

/// Interceptor settings as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CachingConfig {
    /// Enable annotation and 304 handling
    pub enabled: bool,

    /// Digest algorithm name
    pub algorithm: String,

    /// Emit weak (`W/"..."`) fingerprints
    pub weak: bool,

    /// Request methods eligible for annotation
    pub methods: Vec<String>,

    /// Response statuses eligible for annotation
    pub statuses: Vec<u16>,

    /// Default Cache-Control for responses that set none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<DirectivesConfig>,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            algorithm: Algorithm::default().to_string(),
            weak: false,
            methods: DEFAULT_CACHEABLE_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            statuses: DEFAULT_CACHEABLE_STATUSES.to_vec(),
            directives: None,
        }
    }
}

impl CachingConfig {
    /// Configured default directives; a table that sets nothing counts as none
    pub fn default_directives(&self) -> Option<CacheDirectives> {
        self.directives
            .as_ref()
            .map(DirectivesConfig::to_directives)
            .filter(|directives| !directives.is_empty())
    }

    pub fn to_interceptor_config(&self) -> StampResult<InterceptorConfig> {
        Ok(InterceptorConfig {
            enabled: self.enabled,
            default_directives: self.default_directives(),
            use_weak_fingerprint: self.weak,
            algorithm: self.algorithm.parse()?,
            cacheable_methods: self
                .methods
                .iter()
                .map(|m| m.trim().to_ascii_uppercase())
                .collect(),
            cacheable_statuses: self.statuses.iter().copied().collect(),
        })
    }
}

/// Response visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Public,
    Private,
}

/// Cache-Control directives as written on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectivesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    pub no_cache: bool,
    pub no_store: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_maxage: Option<u64>,
    pub must_revalidate: bool,
    pub proxy_revalidate: bool,
    pub no_transform: bool,
    pub immutable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_if_error: Option<u64>,
}

impl DirectivesConfig {
    /// Apply the configured directives in field order
    pub fn to_directives(&self) -> CacheDirectives {
        let mut directives = CacheDirectives::new();

        match self.scope {
            Some(Scope::Public) => {
                directives.mark_public();
            }
            Some(Scope::Private) => {
                directives.mark_private();
            }
            None => {}
        }
        if self.no_cache {
            directives.mark_no_cache();
        }
        if self.no_store {
            directives.mark_no_store();
        }
        if let Some(seconds) = self.max_age {
            directives.set_max_age(seconds);
        }
        if let Some(seconds) = self.s_maxage {
            directives.set_shared_max_age(seconds);
        }
        if self.must_revalidate {
            directives.mark_must_revalidate();
        }
        if self.proxy_revalidate {
            directives.mark_proxy_revalidate();
        }
        if self.no_transform {
            directives.mark_no_transform();
        }
        if self.immutable {
            directives.mark_immutable();
        }
        if let Some(seconds) = self.stale_while_revalidate {
            directives.set_stale_while_revalidate(seconds);
        }
        if let Some(seconds) = self.stale_if_error {
            directives.set_stale_if_error(seconds);
        }

        directives
    }
}
