//! # Service Configuration
//!
//! YAML document naming the catalogs and assessment plans to load and how
//! to serve them.
//!
//! ```yaml
//! bind_address: 0.0.0.0
//! port: 8081
//! max_batch_size: 100
//! log_format: text
//! catalogs:
//!   - catalogs/nist-800-53.yaml
//! plans:
//!   - catalog_id: nist-800-53
//!     path: plans/nist-800-53.yaml
//! ```
//!
//! Relative paths resolve against the directory holding the config file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use evident_core::CatalogId;
use serde::Deserialize;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8081;

/// Default upper bound on policies per batch request.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Assessment plans for one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanSource {
    pub catalog_id: CatalogId,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub max_batch_size: usize,
    pub catalogs: Vec<PathBuf>,
    pub plans: Vec<PlanSource>,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            catalogs: Vec::new(),
            plans: Vec::new(),
            log_format: LogFormat::Text,
        }
    }
}

impl ServiceConfig {
    /// Load, resolve relative paths and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for catalog in &mut self.catalogs {
            if catalog.is_relative() {
                *catalog = base.join(&*catalog);
            }
        }
        for plan in &mut self.plans {
            if plan.path.is_relative() {
                plan.path = base.join(&plan.path);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be greater than zero".into(),
            });
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "max_batch_size",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
