//! stat_core - Stat and modifier resolution library for game entities
//!
//! This library provides:
//! - Stat: A base value plus an ordered stack of modifiers
//! - StatModifier: Additive, multiplicative, override and custom effects
//! - BaseValueHandler: Interception of base value writes (e.g. clamping)
//! - StatsContainer: A named set of stats with change notifications and snapshots

pub mod config;
pub mod container;
pub mod error;
pub mod events;
pub mod handler;
pub mod modifier;
pub mod prelude;
pub mod stat;

// Re-export core types for convenience
pub use config::{load_container, parse_container, ConfigError, ContainerConfig};
pub use container::{StatRecord, StatsContainer, StatsContainerState, DEFAULT_CONTAINER_ID};
pub use error::{Result, StatError};
pub use events::{ChangeKind, StatChanged, SubscriptionId};
pub use handler::BaseValueHandler;
pub use modifier::{CustomFn, ModifierKind, StatModifier};
pub use stat::Stat;
