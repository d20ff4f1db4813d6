//! Change notification for roster mutations
//!
//! Hosts register listeners on a [`NameRoster`](crate::NameRoster) and get one
//! [`RosterChange`] per mutation, delivered synchronously in registration order.

use serde::Serialize;
use std::fmt;

use crate::notice::NoticeCode;

/// A single mutation of roster state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum RosterChange {
    /// A validated name was appended
    NameAdded { name: String },
    /// A name was picked; `removed` counts entries deleted by remove-on-pick
    Picked { name: String, removed: usize },
    /// The current names replaced the saved snapshot
    Saved { count: usize },
    /// The saved snapshot replaced the current names
    Loaded { count: usize },
    /// Current names were emptied
    Cleared { count: usize },
    RemoveOnPickChanged { enabled: bool },
    PendingInputChanged { text: String },
    /// A validation failure set the notice
    NoticeRaised { code: NoticeCode },
    NoticeDismissed,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RosterChange)>;

/// Registered listeners, in registration order
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, change: &RosterChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}
