//! Hard failures raised by stats and containers

use thiserror::Error;

/// Errors returned to the caller when an operation has to abort
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatError {
    #[error("a stat named [{0}] was already added to the container")]
    DuplicateStat(String),
    #[error("a base value handler for stat [{0}] already exists, only one handler per stat is allowed")]
    DuplicateHandler(String),
    #[error("the container does not have a stat named [{0}]")]
    NotFound(String),
    #[error("modifier [{0}] is custom but no custom function was provided")]
    MissingCustomFunction(String),
    #[error("snapshot declares {count} stats but carries {len}")]
    StateCountMismatch { count: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, StatError>;
