//! StatsContainer - Owns a named set of stats and mediates all access

mod state;

pub use state::{StatRecord, StatsContainerState};

use crate::error::{Result, StatError};
use crate::events::{ChangeKind, Listeners, StatChanged, SubscriptionId};
use crate::handler::BaseValueHandler;
use crate::modifier::StatModifier;
use crate::stat::Stat;
use std::collections::HashMap;
use std::fmt::Write;
use tracing::{debug, warn};

/// Id used when a container is created without one
pub const DEFAULT_CONTAINER_ID: &str = "DefaultStats";

/// A named collection of stats.
///
/// Stats keep insertion order for iteration, snapshots and the debug dump.
/// Every change raised by an owned stat is re-raised unchanged to the
/// container's subscribers.
#[derive(Debug)]
pub struct StatsContainer {
    id: String,
    stats: Vec<Stat>,
    /// Stat name -> position in `stats`
    index: HashMap<String, usize>,
    handlers: HashMap<String, BaseValueHandler>,
    listeners: Listeners,
}

impl Default for StatsContainer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_ID)
    }
}

impl StatsContainer {
    /// Create an empty container; an empty id falls back to [`DEFAULT_CONTAINER_ID`]
    pub fn new(id: impl Into<String>) -> Self {
        let mut id = id.into();
        if id.is_empty() {
            id = DEFAULT_CONTAINER_ID.to_string();
        }

        StatsContainer {
            id,
            stats: Vec::new(),
            index: HashMap::new(),
            handlers: HashMap::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// All stats in insertion order
    pub fn stats(&self) -> impl Iterator<Item = &Stat> {
        self.stats.iter()
    }

    // === Stat Management ===

    /// Take ownership of a stat; fails if its name is already used
    pub fn add_stat(&mut self, stat: Stat) -> Result<()> {
        if self.stat_exists(stat.name()) {
            return Err(StatError::DuplicateStat(stat.name().to_string()));
        }

        debug!("container [{}] added stat [{}]", self.id, stat.name());
        self.index.insert(stat.name().to_string(), self.stats.len());
        self.stats.push(stat);
        Ok(())
    }

    /// Add several stats, stopping at the first duplicate
    pub fn add_stats(&mut self, stats: impl IntoIterator<Item = Stat>) -> Result<()> {
        for stat in stats {
            self.add_stat(stat)?;
        }
        Ok(())
    }

    /// Set the base value of a stat, creating it first if absent.
    ///
    /// The write always goes through the handler (if one is registered) and
    /// raises `BaseValueChanged`, also for a freshly created stat.
    pub fn set_or_add_stat(&mut self, name: &str, value: f64) {
        let index = match self.index.get(name).copied() {
            Some(index) => index,
            None => {
                debug!("container [{}] added stat [{}]", self.id, name);
                self.index.insert(name.to_string(), self.stats.len());
                self.stats.push(Stat::new(name, value));
                self.stats.len() - 1
            }
        };
        self.write_base_value(index, value, false);
    }

    /// Detach a stat from the container, dropping the container's forwarding for it
    pub fn remove_stat(&mut self, name: &str) -> Option<Stat> {
        let index = self.index.remove(name)?;
        let stat = self.stats.remove(index);
        for later in &self.stats[index..] {
            if let Some(slot) = self.index.get_mut(later.name()) {
                *slot -= 1;
            }
        }

        debug!("container [{}] removed stat [{}]", self.id, name);
        Some(stat)
    }

    pub fn stat_exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get_stat(&self, name: &str) -> Option<&Stat> {
        self.index.get(name).map(|&i| &self.stats[i])
    }

    // === Values ===

    /// Value before modifiers
    pub fn get_base_value(&self, name: &str) -> Result<f64> {
        Ok(self.stats[self.index_of(name)?].base_value())
    }

    /// Value after modifiers
    pub fn get_current_value(&self, name: &str) -> Result<f64> {
        Ok(self.stats[self.index_of(name)?].current_value())
    }

    /// Set the base value of a stat.
    ///
    /// Unless `bypass_handler` is set, a registered handler for `name`
    /// decides the value actually written.
    pub fn set_base_value(&mut self, name: &str, value: f64, bypass_handler: bool) -> Result<()> {
        let index = self.index_of(name)?;
        self.write_base_value(index, value, bypass_handler);
        Ok(())
    }

    /// Write `current_value + delta` as the new base value.
    ///
    /// This reads the post-modifier value, so active modifiers compound
    /// into the base.
    pub fn add_to_base_value(&mut self, name: &str, delta: f64, bypass_handler: bool) -> Result<()> {
        let current = self.get_current_value(name)?;
        self.set_base_value(name, current + delta, bypass_handler)
    }

    fn write_base_value(&mut self, index: usize, value: f64, bypass_handler: bool) {
        let stat = &self.stats[index];
        let value = match self.handlers.get(stat.name()) {
            Some(handler) if !bypass_handler => {
                let resolved = handler.resolve(stat, value, self);
                debug!(
                    "handler for [{}] resolved requested {} to {}",
                    stat.name(),
                    value,
                    resolved
                );
                resolved
            }
            _ => value,
        };

        self.stats[index].apply_base_value(value, Some(&mut self.listeners));
    }

    // === Modifiers ===

    /// Add a modifier to a stat. An unknown stat only logs a warning.
    pub fn apply_modifier(&mut self, name: &str, modifier: StatModifier) {
        let Some(&index) = self.index.get(name) else {
            warn!(
                "trying to apply modifier [{}] to stat [{}], which does not exist in container [{}]",
                modifier.id(),
                name,
                self.id
            );
            return;
        };

        self.stats[index].push_modifier(modifier, Some(&mut self.listeners));
    }

    /// Remove the first modifier with `id` from a stat.
    ///
    /// Returns whether anything was removed; an unknown stat only logs a warning.
    pub fn remove_modifier(&mut self, name: &str, id: &str) -> bool {
        self.remove_modifier_inner(name, id, false)
    }

    /// Remove every modifier with `id` from a stat, same policy as [`Self::remove_modifier`]
    pub fn remove_modifiers(&mut self, name: &str, id: &str) -> bool {
        self.remove_modifier_inner(name, id, true)
    }

    fn remove_modifier_inner(&mut self, name: &str, id: &str, remove_all: bool) -> bool {
        let Some(&index) = self.index.get(name) else {
            warn!(
                "trying to remove modifier [{}] from stat [{}], which does not exist in container [{}]",
                id, name, self.id
            );
            return false;
        };

        self.stats[index].take_modifier(id, remove_all, Some(&mut self.listeners))
    }

    // === Handlers ===

    /// Register the base value handler for its target stat; one per stat name.
    ///
    /// The stat does not need to exist yet.
    pub fn register_base_value_handler(&mut self, handler: BaseValueHandler) -> Result<()> {
        if self.handlers.contains_key(handler.target_stat()) {
            return Err(StatError::DuplicateHandler(handler.target_stat().to_string()));
        }

        debug!(
            "container [{}] registered base value handler for [{}]",
            self.id,
            handler.target_stat()
        );
        self.handlers.insert(handler.target_stat().to_string(), handler);
        Ok(())
    }

    /// Remove the handler for `name`, if any
    pub fn unregister_base_value_handler(&mut self, name: &str) -> Option<BaseValueHandler> {
        let removed = self.handlers.remove(name);
        if removed.is_some() {
            debug!("container [{}] unregistered base value handler for [{}]", self.id, name);
        }
        removed
    }

    pub fn has_base_value_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    // === Notifications ===

    /// Listen to one kind of change on any owned stat
    pub fn subscribe(
        &mut self,
        kind: ChangeKind,
        callback: impl FnMut(&StatChanged<'_>) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(Some(kind), callback)
    }

    /// Listen to every change on any owned stat
    pub fn subscribe_all(
        &mut self,
        callback: impl FnMut(&StatChanged<'_>) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(None, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // === Diagnostics ===

    /// Header line with the container id, then `- <name>: <current> (Base: <base>)` per stat
    pub fn get_debug_info(&self) -> String {
        let mut out = format!("= [STATS<{}>]\n", self.id);
        for stat in &self.stats {
            // Writing to a String cannot fail
            let _ = writeln!(
                out,
                "- {}: {} (Base: {})",
                stat.name(),
                stat.current_value(),
                stat.base_value()
            );
        }
        out
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| StatError::NotFound(name.to_string()))
    }
}
