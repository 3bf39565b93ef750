//! Change notifications raised by stats and forwarded by containers

use crate::stat::Stat;
use std::fmt;

/// Which of the three change signals was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    BaseValueChanged,
    ModifierAdded,
    ModifierRemoved,
}

/// Payload delivered to subscribers.
///
/// Only `BaseValueChanged` can carry differing old/new values; modifier
/// events report the current base value on both sides.
#[derive(Debug, Clone, Copy)]
pub struct StatChanged<'a> {
    pub kind: ChangeKind,
    pub stat_key: &'a str,
    pub stat: &'a Stat,
    pub old_base_value: f64,
    pub new_base_value: f64,
}

/// Handle returned by `subscribe`, used to cancel the subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StatChanged<'_>)>;

struct Subscription {
    id: SubscriptionId,
    /// `None` receives every kind
    filter: Option<ChangeKind>,
    callback: Callback,
}

/// Ordered subscriber list shared by `Stat` and `StatsContainer`
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl Listeners {
    pub(crate) fn subscribe(
        &mut self,
        filter: Option<ChangeKind>,
        callback: impl FnMut(&StatChanged<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns true if the subscription existed
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver an event to every matching subscriber, in subscription order
    pub(crate) fn emit(&mut self, event: &StatChanged<'_>) {
        for subscription in &mut self.subscriptions {
            if subscription.filter.map_or(true, |kind| kind == event.kind) {
                (subscription.callback)(event);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.subscriptions.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscriptions", &self.len())
            .finish()
    }
}
