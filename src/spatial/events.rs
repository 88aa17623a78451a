//! Synchronous observer lists owned by the object that emits them
//!
//! Handlers run on the emitting thread, in registration order, before the
//! emitting call returns. They receive events by value and cannot borrow the
//! emitter, so a handler that wants to react with further mutations records
//! the work and applies it after dispatch.

use std::fmt;

/// Cell `(x, z)` had its value replaced or was declared mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellChanged {
    /// Cell index along x
    pub x: i32,
    /// Cell index along z
    pub z: i32,
}

/// Handle returned by `subscribe`, used to detach a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(E)>;

/// Ordered list of handlers for one event channel
pub struct Observers<E> {
    handlers: Vec<(SubscriptionId, Handler<E>)>,
    next_id: u64,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Observers<E> {
    /// Create an empty channel
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler; it runs after every handler registered before it
    pub fn subscribe(&mut self, handler: impl FnMut(E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Detach a handler, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Copy> Observers<E> {
    /// Deliver `event` to every handler in registration order
    pub fn emit(&mut self, event: E) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
