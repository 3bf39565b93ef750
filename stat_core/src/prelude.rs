//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::modifier::{ModifierKind, StatModifier};
pub use crate::stat::Stat;

// Container
pub use crate::container::{StatsContainer, StatsContainerState};
pub use crate::handler::BaseValueHandler;

// Notifications
pub use crate::events::{ChangeKind, StatChanged};

// Errors
pub use crate::error::StatError;
