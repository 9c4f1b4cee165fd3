use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::ProjectionAssumptions;

pub const DEFAULT_CONFIG_FILE: &str = "roi.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Adds `Access-Control-Allow-Origin: *` so the form can be embedded
    /// from another origin.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            enable_cors: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub projection: ProjectionAssumptions,
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InitOutcome {
    Created,
    AlreadyPresent,
}

/// Writes the default configuration to `path` unless a file is already there.
///
/// Safe to call on every start; an existing file is never touched.
pub fn init_config(path: &Path) -> Result<InitOutcome, ConfigError> {
    if path.exists() {
        log::debug!("config already present at {}", path.display());
        return Ok(InitOutcome::AlreadyPresent);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = AppConfig::default().to_toml()?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote default config to {}", path.display());
    Ok(InitOutcome::Created)
}

/// Reads the configuration at `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => AppConfig::from_toml(&content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
