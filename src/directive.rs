//! Cache-Control directive builder
//!
//! Directives accumulate in insertion order and render to the header value
//! in that same order. Re-setting a directive keeps its original position.
//! `public` and `private` are mutually exclusive.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Value carried by a single directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Directive present without an argument (`no-store`)
    Flag,
    /// Directive with a numeric argument (`max-age=60`)
    Seconds(u64),
}

/// Flags serialize as `true`, seconds as the number
impl Serialize for DirectiveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Seconds(seconds) => serializer.serialize_u64(*seconds),
        }
    }
}

/// Ordered set of Cache-Control directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CacheDirectives {
    directives: IndexMap<&'static str, DirectiveValue>,
}

impl CacheDirectives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_public(&mut self) -> &mut Self {
        self.directives.shift_remove("private");
        self.flag("public")
    }

    pub fn mark_private(&mut self) -> &mut Self {
        self.directives.shift_remove("public");
        self.flag("private")
    }

    pub fn mark_no_cache(&mut self) -> &mut Self {
        self.flag("no-cache")
    }

    pub fn mark_no_store(&mut self) -> &mut Self {
        self.flag("no-store")
    }

    /// `max-age`: freshness lifetime for any cache
    pub fn set_max_age(&mut self, seconds: u64) -> &mut Self {
        self.seconds("max-age", seconds)
    }

    /// `s-maxage`: freshness lifetime for shared caches
    pub fn set_shared_max_age(&mut self, seconds: u64) -> &mut Self {
        self.seconds("s-maxage", seconds)
    }

    pub fn mark_must_revalidate(&mut self) -> &mut Self {
        self.flag("must-revalidate")
    }

    pub fn mark_proxy_revalidate(&mut self) -> &mut Self {
        self.flag("proxy-revalidate")
    }

    pub fn mark_no_transform(&mut self) -> &mut Self {
        self.flag("no-transform")
    }

    pub fn mark_immutable(&mut self) -> &mut Self {
        self.flag("immutable")
    }

    pub fn set_stale_while_revalidate(&mut self, seconds: u64) -> &mut Self {
        self.seconds("stale-while-revalidate", seconds)
    }

    pub fn set_stale_if_error(&mut self, seconds: u64) -> &mut Self {
        self.seconds("stale-if-error", seconds)
    }

    /// Render the header value, e.g. `public, max-age=60`
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Accumulated directives, in render order
    pub fn to_map(&self) -> &IndexMap<&'static str, DirectiveValue> {
        &self.directives
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    fn flag(&mut self, name: &'static str) -> &mut Self {
        self.directives.insert(name, DirectiveValue::Flag);
        self
    }

    fn seconds(&mut self, name: &'static str, seconds: u64) -> &mut Self {
        self.directives.insert(name, DirectiveValue::Seconds(seconds));
        self
    }
}

impl fmt::Display for CacheDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                DirectiveValue::Flag => f.write_str(name)?,
                DirectiveValue::Seconds(seconds) => write!(f, "{}={}", name, seconds)?,
            }
        }
        Ok(())
    }
}
