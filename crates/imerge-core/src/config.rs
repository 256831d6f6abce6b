//! Configuration management for imerge.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::namespace::Namespace;

/// imerge configuration loaded from .git/imerge/config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Location of the config file inside a repository's git directory.
    #[must_use]
    pub fn path_in(git_dir: impl AsRef<Path>) -> PathBuf {
        git_dir.as_ref().join("imerge").join("config.toml")
    }

    /// Load config from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The session namespace this config selects.
    ///
    /// # Errors
    /// Returns `InvalidNamespace` if the configured prefix is malformed.
    pub fn namespace(&self) -> Result<Namespace> {
        Namespace::new(&self.general.namespace)
    }
}

/// General imerge settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Reference prefix holding merge session state.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Default log filter when `IMERGE_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            log_level: default_log_level(),
        }
    }
}

fn default_namespace() -> String {
    Namespace::DEFAULT_PREFIX.into()
}

fn default_log_level() -> String {
    "warn".into()
}
