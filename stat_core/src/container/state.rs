//! Snapshot/restore of container base values

use super::StatsContainer;
use crate::error::{Result, StatError};
use serde::{Deserialize, Serialize};

/// One stat's persisted base value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub name: String,
    pub base_value: f64,
}

/// Base values of every stat in a container, in container order.
///
/// Modifiers are never part of a snapshot. `count` is redundant and must
/// equal `stats.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsContainerState {
    pub count: usize,
    pub stats: Vec<StatRecord>,
}

impl StatsContainerState {
    pub fn new(stats: Vec<StatRecord>) -> Self {
        StatsContainerState {
            count: stats.len(),
            stats,
        }
    }

    /// Check the redundant count against the record list
    pub fn validate(&self) -> Result<()> {
        if self.count != self.stats.len() {
            return Err(StatError::StateCountMismatch {
                count: self.count,
                len: self.stats.len(),
            });
        }
        Ok(())
    }
}

impl StatsContainer {
    /// Capture `(name, base_value)` for every stat
    pub fn get_state(&self) -> StatsContainerState {
        StatsContainerState::new(
            self.stats()
                .map(|stat| StatRecord {
                    name: stat.name().to_string(),
                    base_value: stat.base_value(),
                })
                .collect(),
        )
    }

    /// Upsert every record with [`StatsContainer::set_or_add_stat`], so
    /// handlers and `BaseValueChanged` apply to new stats as well.
    ///
    /// Stats missing from the snapshot are left alone. The snapshot is
    /// validated before anything is written.
    pub fn apply_state(&mut self, state: &StatsContainerState) -> Result<()> {
        state.validate()?;
        for record in &state.stats {
            self.set_or_add_stat(&record.name, record.base_value);
        }
        Ok(())
    }
}
