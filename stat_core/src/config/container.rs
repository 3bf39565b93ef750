//! Declarative container definitions

use super::ConfigError;
use crate::container::StatsContainer;
use crate::handler::BaseValueHandler;
use crate::modifier::{ModifierKind, StatModifier};
use crate::stat::Stat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A container as written in a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Falls back to the default container id when absent
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub stats: Vec<StatDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatDefinition {
    pub name: String,
    pub base: f64,
    /// Lower bound enforced by a clamp handler
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound enforced by a clamp handler
    #[serde(default)]
    pub max: Option<f64>,
    /// Modifiers present from the start
    #[serde(default)]
    pub modifiers: Vec<ModifierDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierDefinition {
    pub id: String,
    pub kind: ModifierKind,
    pub magnitude: f64,
    #[serde(default)]
    pub priority: i32,
}

impl ModifierDefinition {
    fn build(&self) -> Result<StatModifier, ConfigError> {
        if self.kind == ModifierKind::Custom {
            return Err(ConfigError::Invalid(format!(
                "modifier [{}] is custom; custom modifiers must be added from code",
                self.id
            )));
        }
        Ok(StatModifier::new(
            self.id.clone(),
            self.kind,
            self.magnitude,
            self.priority,
            None,
        )?)
    }
}

impl StatDefinition {
    fn handler(&self) -> Result<Option<BaseValueHandler>, ConfigError> {
        let (min, max) = match (self.min, self.max) {
            (None, None) => return Ok(None),
            (min, max) => (min.unwrap_or(f64::NEG_INFINITY), max.unwrap_or(f64::INFINITY)),
        };
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "stat [{}] has min {} greater than max {}",
                self.name, min, max
            )));
        }
        Ok(Some(BaseValueHandler::clamp(self.name.clone(), min, max)))
    }
}

impl ContainerConfig {
    /// Build a container: stats in file order, clamp handlers, then starting modifiers.
    ///
    /// The declared base is stored as written; the clamp applies to later writes.
    pub fn build(&self) -> Result<StatsContainer, ConfigError> {
        let mut container = StatsContainer::new(self.id.clone().unwrap_or_default());

        for definition in &self.stats {
            let handler = definition.handler()?;
            let modifiers = definition
                .modifiers
                .iter()
                .map(ModifierDefinition::build)
                .collect::<Result<Vec<_>, _>>()?;

            let mut stat = Stat::new(definition.name.clone(), definition.base);
            for modifier in modifiers {
                stat.add_modifier(modifier);
            }

            container.add_stat(stat)?;
            if let Some(handler) = handler {
                container.register_base_value_handler(handler)?;
            }
        }

        Ok(container)
    }
}

/// Load a container definition from a TOML file
pub fn load_container(path: &Path) -> Result<StatsContainer, ConfigError> {
    let config: ContainerConfig = super::load_toml(path)?;
    config.build()
}

/// Load a container definition from a TOML string
pub fn parse_container(content: &str) -> Result<StatsContainer, ConfigError> {
    let config: ContainerConfig = super::parse_toml(content)?;
    config.build()
}
