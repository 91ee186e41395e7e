//! Configuration file handling
//!
//! Settings live in one TOML file (see [`schema`]). Every setting has a
//! default, so a missing file is not an error and `stamp` runs without one.

pub mod schema;

pub use schema::Config;

use crate::error::{StampError, StampResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Where the active configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Defaults,
}

/// Result of writing the default configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Written,
    /// A file already existed and `force` was not set
    Kept,
}

/// The configuration file at a fixed location
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Use `path` when given (`--config` / `STAMP_CONFIG`), otherwise the
    /// per-user location
    pub fn locate(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(Self::user_config_path),
        }
    }

    /// `<config dir>/stamp/config.toml`, relative to the working directory
    /// when the platform has no config dir
    pub fn user_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("stamp").join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> StampResult<Config> {
        let (config, _) = self.load_with_origin().await?;
        Ok(config)
    }

    /// Parse the file, or fall back to defaults when it does not exist
    pub async fn load_with_origin(&self) -> StampResult<(Config, ConfigOrigin)> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok((Config::default(), ConfigOrigin::Defaults));
            }
            Err(e) => {
                return Err(StampError::io(
                    format!("reading config {}", self.path.display()),
                    e,
                ))
            }
        };

        let config = toml::from_str(&text).map_err(|e| StampError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok((config, ConfigOrigin::File))
    }

    /// Write `config`, creating missing parent directories
    pub async fn save(&self, config: &Config) -> StampResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StampError::ConfigDirCreate {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let text = toml::to_string_pretty(config)?;
        fs::write(&self.path, text)
            .await
            .map_err(|e| StampError::io(format!("writing config {}", self.path.display()), e))?;

        info!("Wrote config to {}", self.path.display());
        Ok(())
    }

    /// Write the default configuration unless a file exists and `force` is off
    pub async fn init(&self, force: bool) -> StampResult<InitOutcome> {
        if !force {
            let exists = fs::try_exists(&self.path)
                .await
                .map_err(|e| StampError::io(format!("checking {}", self.path.display()), e))?;
            if exists {
                return Ok(InitOutcome::Kept);
            }
        }

        self.save(&Config::default()).await?;
        Ok(InitOutcome::Written)
    }
}
