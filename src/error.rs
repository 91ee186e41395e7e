//! Error types for Stamp
//!
//! All modules use `StampResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stamp operations
pub type StampResult<T> = Result<T, StampError>;

/// All errors that can occur in Stamp
#[derive(Error, Debug)]
pub enum StampError {
    // Fingerprint errors
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to read response body: {source}")]
    StreamRead {
        #[source]
        source: std::io::Error,
    },

    // Transport errors
    #[error("Invalid header {name}: {value:?}")]
    InvalidHeader { name: String, value: String },

    #[error("Downstream handler failed: {0}")]
    Handler(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl StampError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a body stream read error
    pub fn stream_read(source: std::io::Error) -> Self {
        Self::StreamRead { source }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedAlgorithm(_) => {
                Some("Supported algorithms: md5, sha224, sha256, sha384, sha512")
            }
            Self::ConfigInvalid { .. } => Some("Run: stamp config init --force"),
            _ => None,
        }
    }
}
