//! Error types for catalog loading and resolver registration.

use std::path::PathBuf;

use evident_core::EngineName;
use thiserror::Error;

/// Failure to load a catalog or plan document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate catalog id {catalog_id} in {path}")]
    DuplicateCatalog { catalog_id: String, path: PathBuf },
}

/// Failure to register a resolver plugin.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a resolver is already registered for engine {engine}")]
    DuplicateEngine { engine: EngineName },
}
