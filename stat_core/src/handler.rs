//! BaseValueHandler - Intercepts base value writes issued through a container

use crate::container::StatsContainer;
use crate::stat::Stat;
use std::fmt;

/// `(stat, requested_value, container) -> accepted_value`
pub type ResolveFn = Box<dyn Fn(&Stat, f64, &StatsContainer) -> f64>;

/// Rewrites a requested base value before it is committed.
///
/// Only writes made through [`StatsContainer::set_base_value`] (and
/// `add_to_base_value`) pass through a handler; direct writes on a
/// detached [`Stat`] do not.
pub struct BaseValueHandler {
    target_stat: String,
    resolve: ResolveFn,
}

impl BaseValueHandler {
    pub fn new(
        target_stat: impl Into<String>,
        resolve: impl Fn(&Stat, f64, &StatsContainer) -> f64 + 'static,
    ) -> Self {
        BaseValueHandler {
            target_stat: target_stat.into(),
            resolve: Box::new(resolve),
        }
    }

    /// Keep the base value within `[min, max]`
    pub fn clamp(target_stat: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(target_stat, move |_, value, _| value.max(min).min(max))
    }

    /// Reject negative base values by writing zero instead
    pub fn non_negative(target_stat: impl Into<String>) -> Self {
        Self::new(target_stat, |_, value, _| value.max(0.0))
    }

    pub fn target_stat(&self) -> &str {
        &self.target_stat
    }

    pub fn resolve(&self, stat: &Stat, requested_value: f64, container: &StatsContainer) -> f64 {
        (self.resolve)(stat, requested_value, container)
    }
}

impl fmt::Debug for BaseValueHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseValueHandler")
            .field("target_stat", &self.target_stat)
            .finish_non_exhaustive()
    }
}
