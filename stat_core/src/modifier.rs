//! StatModifier - One immutable effect applied to a stat

use crate::error::{Result, StatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Pure function `(base_value, value_so_far) -> new_value` used by custom modifiers
pub type CustomFn = Rc<dyn Fn(f64, f64) -> f64>;

/// How a modifier contributes to the current value of a stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Flat amount added to the base value
    Additive,
    /// Fractional rate; all rates on a stat are summed (0.5 = +50%)
    Multiplicative,
    /// Replaces the computed value outright, highest priority wins
    Override,
    /// Arbitrary function of the base value and the running value
    Custom,
}

/// A single effect on a stat.
///
/// Ids are not unique: several modifiers may share one id so they can be
/// removed together.
#[derive(Clone)]
pub struct StatModifier {
    id: String,
    kind: ModifierKind,
    magnitude: f64,
    /// Only meaningful for [`ModifierKind::Override`]
    priority: i32,
    /// Only meaningful for [`ModifierKind::Custom`]
    custom_fn: Option<CustomFn>,
}

impl StatModifier {
    /// Create a modifier of any kind.
    ///
    /// Fails with [`StatError::MissingCustomFunction`] when `kind` is
    /// `Custom` and no function is given.
    pub fn new(
        id: impl Into<String>,
        kind: ModifierKind,
        magnitude: f64,
        priority: i32,
        custom_fn: Option<CustomFn>,
    ) -> Result<Self> {
        let id = id.into();
        if kind == ModifierKind::Custom && custom_fn.is_none() {
            return Err(StatError::MissingCustomFunction(id));
        }

        Ok(StatModifier {
            id,
            kind,
            magnitude,
            priority,
            custom_fn,
        })
    }

    /// Flat addition
    pub fn additive(id: impl Into<String>, magnitude: f64) -> Self {
        Self::infallible(id.into(), ModifierKind::Additive, magnitude, 0)
    }

    /// Fractional rate (as decimal, e.g. 0.5 for +50%)
    pub fn multiplicative(id: impl Into<String>, rate: f64) -> Self {
        Self::infallible(id.into(), ModifierKind::Multiplicative, rate, 0)
    }

    /// Replace the value with `magnitude` if no override has a higher priority
    pub fn overriding(id: impl Into<String>, magnitude: f64, priority: i32) -> Self {
        Self::infallible(id.into(), ModifierKind::Override, magnitude, priority)
    }

    /// Custom calculation, applied after additive and multiplicative modifiers
    pub fn custom(id: impl Into<String>, f: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        StatModifier {
            id: id.into(),
            kind: ModifierKind::Custom,
            magnitude: 0.0,
            priority: 0,
            custom_fn: Some(Rc::new(f)),
        }
    }

    fn infallible(id: String, kind: ModifierKind, magnitude: f64, priority: i32) -> Self {
        StatModifier {
            id,
            kind,
            magnitude,
            priority,
            custom_fn: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The custom function, only returned for custom modifiers
    pub fn custom_fn(&self) -> Option<&CustomFn> {
        match self.kind {
            ModifierKind::Custom => self.custom_fn.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for StatModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatModifier")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("magnitude", &self.magnitude)
            .field("priority", &self.priority)
            .field("custom_fn", &self.custom_fn.as_ref().map(|_| ".."))
            .finish()
    }
}
