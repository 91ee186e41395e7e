//! Content fingerprints (ETags) for response bodies
//!
//! A fingerprint is a digest of the response body rendered in its wire form:
//!
//! | Kind | Wire form | Equivalence |
//! |------|-----------|-------------|
//! | Strong | `"<hash>"` | byte-exact |
//! | Weak | `W/"<hash>"` | semantic |
//!
//! Digests are computed incrementally over the body stream, so memory use is
//! bounded by [`CHUNK_SIZE`] regardless of body length.

pub mod compare;
pub mod generator;

pub use compare::{extract_hash, is_weak, matches};
pub use generator::{compute_fingerprint, compute_fingerprint_bytes, CHUNK_SIZE};

use crate::error::StampError;
use std::fmt;
use std::str::FromStr;

/// Marker that prefixes weak fingerprints on the wire
pub const WEAK_PREFIX: &str = "W/";

/// Digest algorithms usable for fingerprinting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Md5,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the hex digest this algorithm produces
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha224 => 56,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }

    /// All supported algorithms
    pub fn all() -> &'static [Self] {
        &[
            Self::Md5,
            Self::Sha224,
            Self::Sha256,
            Self::Sha384,
            Self::Sha512,
        ]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == lowered)
            .ok_or_else(|| StampError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// A content fingerprint: digest output plus weak/strong flag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    hash: String,
    weak: bool,
}

impl Fingerprint {
    /// Strong (byte-exact) fingerprint
    pub fn strong(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            weak: false,
        }
    }

    /// Weak (semantic) fingerprint
    pub fn weak(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            weak: true,
        }
    }

    /// Bare digest, without quotes or prefix
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            write!(f, "{}\"{}\"", WEAK_PREFIX, self.hash)
        } else {
            write!(f, "\"{}\"", self.hash)
        }
    }
}

impl FromStr for Fingerprint {
    type Err = StampError;

    /// Parse wire text. Unquoted values are accepted as strong fingerprints.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let hash = extract_hash(text);
        if hash.is_empty() || hash.contains('"') {
            return Err(StampError::User(format!("Invalid fingerprint: {}", s)));
        }

        Ok(Self {
            hash: hash.to_string(),
            weak: is_weak(text),
        })
    }
}
