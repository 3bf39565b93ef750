//! Container definitions read from TOML

mod container;

pub use container::{
    load_container, parse_container, ContainerConfig, ModifierDefinition, StatDefinition,
};

use crate::error::StatError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a container definition could not be turned into a container
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid definition: {0}")]
    Invalid(String),
    #[error(transparent)]
    Stat(#[from] StatError),
}

/// Read `path` and deserialize its TOML content
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(ConfigError::from)
}
