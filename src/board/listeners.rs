//! Listener registry with two-phase registration.
//!
//! Adding or removing a listener only marks its slot pending; the change
//! is committed by `commit`, which the board calls once per frame start.
//! The attach state of each listener lives in its slot, so listeners can't
//! promote themselves.

use std::cell::RefCell;
use std::rc::Weak;

use log::error;

use crate::core::{AttachState, ObjectId};
use crate::objects::BoardListener;

/// Identifies a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKey {
    /// A managed object, registered by `GameBoard::attach`.
    Object(ObjectId),
    /// An external observer registered by `GameBoard::add_listener`.
    External(u32),
}

impl std::fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Object(id) => write!(f, "Listener({id})"),
            Self::External(n) => write!(f, "Listener(external {n})"),
        }
    }
}

/// Where notifications for a slot are delivered.
#[derive(Clone, Debug)]
pub(crate) enum ListenerTarget {
    /// Resolved through the board's children by object id.
    Object,
    /// Not owned by the board; pruned once the owner drops it.
    External(Weak<RefCell<dyn BoardListener>>),
}

#[derive(Clone, Debug)]
pub(crate) struct ListenerSlot {
    pub(crate) key: ListenerKey,
    pub(crate) state: AttachState,
    pub(crate) target: ListenerTarget,
}

/// Outcome of a `commit` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerCommit {
    /// Slots promoted from `WaitForAttach` to `Attached`.
    pub promoted: usize,
    /// Slots dropped: committed detaches plus dead external listeners.
    pub removed: usize,
}

/// Ordered set of listener slots.
#[derive(Clone, Debug, Default)]
pub struct ListenerSet {
    slots: Vec<ListenerSlot>,
    next_external: u32,
}

impl ListenerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a key for a new external listener.
    pub(crate) fn next_external_key(&mut self) -> ListenerKey {
        let key = ListenerKey::External(self.next_external);
        self.next_external += 1;
        key
    }

    /// Register `key` as pending attach.
    ///
    /// Panics if `key` is already registered.
    pub(crate) fn add(&mut self, key: ListenerKey, target: ListenerTarget) {
        if self.contains(key) {
            error!(target: "game_board", "failed to add listener {key}: listener is not detached");
            panic!("listener {key} is already registered");
        }

        let mut state = AttachState::Detached;
        state.advance();
        self.slots.push(ListenerSlot { key, state, target });
    }

    /// Mark `key` as pending detach. A second call while pending is a no-op.
    ///
    /// Panics if `key` isn't registered.
    pub(crate) fn remove(&mut self, key: ListenerKey) {
        let Some(slot) = self.slots.iter_mut().find(|s| s.key == key) else {
            error!(target: "game_board", "failed to remove listener {key}: listener is not attached");
            panic!("listener {key} is not registered");
        };

        if slot.state != AttachState::WaitForDetach {
            slot.state.advance_to(AttachState::WaitForDetach);
        }
    }

    /// Commit pending changes: drop `WaitForDetach` slots and promote
    /// `WaitForAttach` ones. External listeners whose owner is gone are
    /// dropped as well.
    pub(crate) fn commit(&mut self) -> ListenerCommit {
        let mut outcome = ListenerCommit::default();

        self.slots.retain_mut(|slot| {
            if slot.state == AttachState::WaitForDetach {
                slot.state.advance();
                outcome.removed += 1;
                return false;
            }
            if let ListenerTarget::External(weak) = &slot.target {
                if weak.strong_count() == 0 {
                    outcome.removed += 1;
                    return false;
                }
            }
            true
        });

        for slot in &mut self.slots {
            if slot.state == AttachState::WaitForAttach {
                slot.state.advance();
                outcome.promoted += 1;
            }
        }

        outcome
    }

    /// Restore a slot read from a snapshot.
    pub(crate) fn restore(&mut self, key: ListenerKey, state: AttachState) {
        self.slots.push(ListenerSlot {
            key,
            state,
            target: ListenerTarget::Object,
        });
    }

    /// Check whether `key` has a slot (pending states included).
    #[must_use]
    pub fn contains(&self, key: ListenerKey) -> bool {
        self.slots.iter().any(|s| s.key == key)
    }

    /// Attach state of `key`, or `None` if it has no slot.
    #[must_use]
    pub fn state(&self, key: ListenerKey) -> Option<AttachState> {
        self.slots.iter().find(|s| s.key == key).map(|s| s.state)
    }

    /// Keys of slots currently in the `Attached` state, in registration order.
    pub fn attached(&self) -> impl Iterator<Item = ListenerKey> + '_ {
        self.slots
            .iter()
            .filter(|s| s.state == AttachState::Attached)
            .map(|s| s.key)
    }

    pub(crate) fn slots(&self) -> &[ListenerSlot] {
        &self.slots
    }

    /// Number of slots, pending ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
