use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use export_core::Catalog;
use export_engine::{EngineConfig, RpcSettings};
use serde::Deserialize;
use thiserror::Error;

use crate::host::logging::LogDestination;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "wiki-export.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub namespace: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub debug: bool,
    pub log: LogDestination,
    pub catalog: Catalog,
}

impl Default for AppConfig {
    fn default() -> Self {
        let rpc = RpcSettings::default();
        Self {
            endpoint: rpc.endpoint,
            namespace: rpc.namespace,
            connect_timeout_secs: rpc.connect_timeout.as_secs(),
            request_timeout_secs: rpc.request_timeout.as_secs(),
            debug: false,
            log: LogDestination::default(),
            catalog: Catalog::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or the default file if present, or built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rpc: RpcSettings {
                endpoint: self.endpoint.clone(),
                namespace: self.namespace.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            catalog: self.catalog.clone(),
        }
    }
}
