//! Outside-interaction listening for open pickers.
//!
//! The host owns one [`OutsideClickSignal`] and forwards clicks that land
//! outside a widget to that widget only while it holds a live
//! [`OutsideClickSubscription`]. Dropping the subscription unregisters it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<ListenerId>,
}

#[derive(Debug, Clone, Default)]
pub struct OutsideClickSignal {
    registry: Rc<RefCell<Registry>>,
}

impl OutsideClickSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> OutsideClickSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.active.insert(id);
        tracing::trace!(listener = id.0, "outside-click listener attached");
        OutsideClickSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.registry.borrow().active.contains(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().active.len()
    }
}

/// Live registration with an [`OutsideClickSignal`].
#[derive(Debug)]
pub struct OutsideClickSubscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl OutsideClickSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for OutsideClickSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
            tracing::trace!(listener = self.id.0, "outside-click listener detached");
        }
    }
}
