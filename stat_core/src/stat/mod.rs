//! Stat - A named base value plus an ordered modifier stack

mod resolve;

pub use resolve::{resolve_current_value, winning_override};

use crate::events::{ChangeKind, Listeners, StatChanged, SubscriptionId};
use crate::modifier::StatModifier;
use std::fmt;
use tracing::trace;

/// A named numeric quantity.
///
/// `current_value` is derived from `base_value` and the modifier list and
/// is recomputed synchronously by every mutation, before subscribers are
/// notified.
pub struct Stat {
    name: String,
    base_value: f64,
    current_value: f64,
    /// Insertion order matters for override ties and custom chaining
    modifiers: Vec<StatModifier>,
    listeners: Listeners,
}

impl Stat {
    /// Create a stat with no modifiers
    pub fn new(name: impl Into<String>, base_value: f64) -> Self {
        Stat {
            name: name.into(),
            base_value,
            current_value: base_value,
            modifiers: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value before any modifier is applied
    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    /// Value after all modifiers are applied
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    /// Replace the base value (no validation), recompute and raise `BaseValueChanged`
    pub fn set_base_value(&mut self, value: f64) {
        self.apply_base_value(value, None);
    }

    /// Append a modifier, recompute and raise `ModifierAdded`
    pub fn add_modifier(&mut self, modifier: StatModifier) {
        self.push_modifier(modifier, None);
    }

    /// Remove the first modifier with `id`, or every one when `remove_all`.
    ///
    /// Returns false (and raises nothing) if no modifier has that id.
    pub fn remove_modifier(&mut self, id: &str, remove_all: bool) -> bool {
        self.take_modifier(id, remove_all, None)
    }

    /// Re-run the resolution without raising any event
    pub fn recalculate(&mut self) {
        self.current_value = resolve_current_value(self.base_value, &self.modifiers);
        trace!(
            "recalculated [{}]: {} (base {}, {} modifiers)",
            self.name,
            self.current_value,
            self.base_value,
            self.modifiers.len()
        );
    }

    /// Listen to one kind of change on this stat
    pub fn subscribe(
        &mut self,
        kind: ChangeKind,
        callback: impl FnMut(&StatChanged<'_>) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(Some(kind), callback)
    }

    /// Listen to every change on this stat
    pub fn subscribe_all(
        &mut self,
        callback: impl FnMut(&StatChanged<'_>) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(None, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // === Mutation with optional forwarding (used by StatsContainer) ===

    pub(crate) fn apply_base_value(&mut self, value: f64, forward: Option<&mut Listeners>) {
        let old = self.base_value;
        self.base_value = value;
        self.recalculate();
        self.notify(ChangeKind::BaseValueChanged, old, forward);
    }

    pub(crate) fn push_modifier(&mut self, modifier: StatModifier, forward: Option<&mut Listeners>) {
        self.modifiers.push(modifier);
        self.recalculate();
        self.notify(ChangeKind::ModifierAdded, self.base_value, forward);
    }

    pub(crate) fn take_modifier(
        &mut self,
        id: &str,
        remove_all: bool,
        forward: Option<&mut Listeners>,
    ) -> bool {
        let Some(first) = self.modifiers.iter().position(|m| m.id() == id) else {
            return false;
        };

        if remove_all {
            self.modifiers.retain(|m| m.id() != id);
        } else {
            self.modifiers.remove(first);
        }

        self.recalculate();
        self.notify(ChangeKind::ModifierRemoved, self.base_value, forward);
        true
    }

    /// Stat subscribers run first, then the forwarding container's
    fn notify(&mut self, kind: ChangeKind, old_base_value: f64, forward: Option<&mut Listeners>) {
        let mut listeners = std::mem::take(&mut self.listeners);

        let event = StatChanged {
            kind,
            stat_key: &self.name,
            stat: &*self,
            old_base_value,
            new_base_value: self.base_value,
        };
        listeners.emit(&event);
        if let Some(container) = forward {
            container.emit(&event);
        }

        self.listeners = listeners;
    }
}

impl fmt::Debug for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stat")
            .field("name", &self.name)
            .field("base_value", &self.base_value)
            .field("current_value", &self.current_value)
            .field("modifiers", &self.modifiers)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<(ChangeKind, f64, f64, f64)>>>;

    fn record(stat: &mut Stat) -> Seen {
        let seen: Seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        stat.subscribe_all(move |e| {
            sink.borrow_mut()
                .push((e.kind, e.old_base_value, e.new_base_value, e.stat.current_value()))
        });
        seen
    }

    #[test]
    fn test_new_stat_has_equal_values() {
        let stat = Stat::new("hp", 100.0);
        assert!((stat.base_value() - stat.current_value()).abs() < f64::EPSILON);
        assert!(stat.modifiers().is_empty());
    }

    #[test]
    fn test_set_base_value_accepts_negative() {
        let mut stat = Stat::new("hp", 100.0);
        stat.set_base_value(-10.0);
        assert!((stat.base_value() + 10.0).abs() < f64::EPSILON);
        assert!((stat.current_value() + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_value_change_event() {
        let mut stat = Stat::new("hp", 100.0);
        stat.add_modifier(StatModifier::additive("ring", 5.0));
        let seen = record(&mut stat);

        stat.set_base_value(50.0);

        // Subscribers observe the already-recomputed value
        assert_eq!(*seen.borrow(), vec![(ChangeKind::BaseValueChanged, 100.0, 50.0, 55.0)]);
    }

    #[test]
    fn test_modifier_events_carry_unchanged_base() {
        let mut stat = Stat::new("hp", 100.0);
        let seen = record(&mut stat);

        stat.add_modifier(StatModifier::additive("ring", 5.0));
        stat.remove_modifier("ring", false);

        assert_eq!(
            *seen.borrow(),
            vec![
                (ChangeKind::ModifierAdded, 100.0, 100.0, 105.0),
                (ChangeKind::ModifierRemoved, 100.0, 100.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_remove_missing_id_is_silent() {
        let mut stat = Stat::new("hp", 100.0);
        stat.add_modifier(StatModifier::additive("ring", 5.0));
        let seen = record(&mut stat);

        assert!(!stat.remove_modifier("amulet", false));
        assert!(seen.borrow().is_empty());
        assert!((stat.current_value() - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_first_only() {
        let mut stat = Stat::new("hp", 100.0);
        stat.add_modifier(StatModifier::additive("aura", 10.0));
        stat.add_modifier(StatModifier::additive("aura", 20.0));
        stat.add_modifier(StatModifier::additive("other", 1.0));

        assert!(stat.remove_modifier("aura", false));
        assert_eq!(stat.modifiers().len(), 2);
        assert!((stat.modifiers()[0].magnitude() - 20.0).abs() < f64::EPSILON);
        assert!((stat.current_value() - 121.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_all_with_id() {
        let mut stat = Stat::new("hp", 100.0);
        stat.add_modifier(StatModifier::additive("aura", 10.0));
        stat.add_modifier(StatModifier::additive("other", 1.0));
        stat.add_modifier(StatModifier::multiplicative("aura", 0.5));

        assert!(stat.remove_modifier("aura", true));
        assert_eq!(stat.modifiers().len(), 1);
        assert_eq!(stat.modifiers()[0].id(), "other");
        assert!((stat.current_value() - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut stat = Stat::new("speed", 5.0);
        stat.add_modifier(StatModifier::multiplicative("haste", 0.3));
        stat.add_modifier(StatModifier::custom("floor", |_, v| v.floor()));
        let before = stat.current_value();

        stat.recalculate();
        stat.recalculate();

        assert_eq!(stat.current_value(), before);
    }

    #[test]
    fn test_override_lifecycle() {
        let mut stat = Stat::new("hp", 100.0);
        stat.add_modifier(StatModifier::additive("flat", 20.0));
        stat.add_modifier(StatModifier::overriding("god", 999.0, 1));
        assert!((stat.current_value() - 999.0).abs() < f64::EPSILON);

        stat.remove_modifier("god", false);
        assert!((stat.current_value() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        let mut stat = Stat::new("hp", 100.0);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = stat.subscribe(ChangeKind::BaseValueChanged, move |_| *sink.borrow_mut() += 1);

        stat.set_base_value(1.0);
        stat.add_modifier(StatModifier::additive("x", 1.0));
        assert!(stat.unsubscribe(id));
        stat.set_base_value(2.0);

        assert_eq!(*count.borrow(), 1);
    }
}
