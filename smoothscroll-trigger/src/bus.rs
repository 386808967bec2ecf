//! An explicit event dispatcher owned by the application shell.
//!
//! Bindings subscribe to a bus instead of registering global listeners, so their lifetime is
//! tied to a [`Subscription`] value.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// What a handler did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    /// The handler took over; the host should skip its default action (e.g. the anchor jump).
    PreventDefault,
}

type Handler<E> = Rc<dyn Fn(&E) -> Outcome>;

struct Registry<E> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, Handler<E>)>>,
}

impl<E> Registry<E> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.borrow().iter().any(|(h, _)| *h == id)
    }
}

trait Detach {
    fn detach(&self, id: u64);
}

impl<E> Detach for Registry<E> {
    fn detach(&self, id: u64) {
        // Take the handler out before dropping it: its destructor may touch the bus.
        let removed = {
            let mut handlers = self.handlers.borrow_mut();
            handlers
                .iter()
                .position(|(h, _)| *h == id)
                .map(|i| handlers.remove(i))
        };
        drop(removed);
    }
}

pub struct EventBus<E> {
    registry: Rc<Registry<E>>,
}

impl<E: 'static> EventBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&E) -> Outcome + 'static) -> Subscription {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id.wrapping_add(1));
        self.registry
            .handlers
            .borrow_mut()
            .push((id, Rc::new(handler)));
        let strong: Rc<dyn Detach> = self.registry.clone();
        let registry = Rc::downgrade(&strong);
        Subscription {
            id,
            registry: Some(registry),
        }
    }

    /// Delivers `event` to every current subscriber in subscription order.
    ///
    /// A handler removed while the dispatch is running is not called. Returns `true` when a
    /// handler asked to prevent the default action.
    pub fn dispatch(&self, event: &E) -> bool {
        let snapshot: Vec<(u64, Handler<E>)> = self
            .registry
            .handlers
            .borrow()
            .iter()
            .map(|(id, h)| (*id, Rc::clone(h)))
            .collect();

        let mut prevented = false;
        for (id, handler) in snapshot {
            if !self.registry.contains(id) {
                continue;
            }
            if handler(event) == Outcome::PreventDefault {
                prevented = true;
            }
        }
        prevented
    }

    pub fn len(&self) -> usize {
        self.registry.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.registry.handlers.borrow().len())
            .finish()
    }
}

/// Keeps a handler registered. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    registry: Option<Weak<dyn Detach>>,
}

impl Subscription {
    /// Removes the handler. Calling this again (or after the bus is gone) is a no-op.
    pub fn unsubscribe(&mut self) {
        let Some(registry) = self.registry.take() else {
            return;
        };
        if let Some(registry) = registry.upgrade() {
            registry.detach(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.strong_count() > 0)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
