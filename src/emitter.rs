//! Synchronous, single-threaded publish/subscribe.
//!
//! An [`Emitter`] maps event names to ordered lists of listeners.  Emitting
//! an event invokes a snapshot of that list taken when [`Emitter::emit`] is
//! called, so listeners that register or deregister other listeners (or
//! themselves) do not disturb the dispatch in progress.
//!
//! Cloning an `Emitter` yields a second handle onto the same registry.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handle identifying a single registered listener, used to deregister it
/// with [`Emitter::off`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerId(u64);

type Handler<A> = Rc<dyn Fn(&A)>;

struct Registry<A: ?Sized> {
    next_id: u64,
    callbacks: HashMap<String, Vec<(ListenerId, Handler<A>)>>,
}

impl<A: ?Sized> Registry<A> {
    fn allocate(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn remove(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(listeners) = self.callbacks.get_mut(event) else {
            return false;
        };
        match listeners.iter().position(|&(lid, _)| lid == id) {
            Some(i) => {
                listeners.remove(i);
                true
            }
            None => false,
        }
    }
}

pub struct Emitter<A: ?Sized> {
    registry: Rc<RefCell<Registry<A>>>,
}

impl<A: ?Sized> Emitter<A> {
    pub fn new() -> Emitter<A> {
        Emitter {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: HashMap::new(),
            })),
        }
    }

    /// Append `handler` to the listeners for `event`.  Any context the
    /// handler needs is captured by the closure.
    pub fn on<F>(&self, event: &str, handler: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        let id = self.registry.borrow_mut().allocate();
        self.insert(event, id, Rc::new(handler));
        id
    }

    /// Register `handler` to be invoked for the next emission of `event`
    /// only.  The listener is removed from the registry before `handler`
    /// runs, so an emission triggered from within `handler` will not reach
    /// it again.
    pub fn once<F>(&self, event: &str, handler: F) -> ListenerId
    where
        F: FnOnce(&A) + 'static,
        A: 'static,
    {
        let id = self.registry.borrow_mut().allocate();
        let registry: Weak<RefCell<Registry<A>>> = Rc::downgrade(&self.registry);
        let name = event.to_owned();
        let handler = Cell::new(Some(handler));
        self.insert(
            event,
            id,
            Rc::new(move |args: &A| {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().remove(&name, id);
                }
                if let Some(f) = handler.take() {
                    f(args);
                }
            }),
        );
        id
    }

    fn insert(&self, event: &str, id: ListenerId, handler: Handler<A>) {
        self.registry
            .borrow_mut()
            .callbacks
            .entry(event.to_owned())
            .or_default()
            .push((id, handler));
        tracing::trace!(event, ?id, "registered listener");
    }

    /// Remove the listener `id` from `event`.  Returns `false` if no such
    /// listener was registered.
    pub fn off(&self, event: &str, id: ListenerId) -> bool {
        let removed = self.registry.borrow_mut().remove(event, id);
        tracing::trace!(event, ?id, removed, "deregistered listener");
        removed
    }

    /// Remove every listener for `event`
    pub fn off_all(&self, event: &str) {
        self.registry.borrow_mut().callbacks.remove(event);
        tracing::trace!(event, "deregistered all listeners");
    }

    /// Invoke the listeners currently registered for `event`, in
    /// registration order, with `args`
    pub fn emit(&self, event: &str, args: &A) {
        let snapshot: Vec<Handler<A>> = self
            .registry
            .borrow()
            .callbacks
            .get(event)
            .map_or_else(Vec::new, |listeners| {
                listeners.iter().map(|(_, h)| Rc::clone(h)).collect()
            });
        tracing::trace!(event, listeners = snapshot.len(), "emitting event");
        for handler in snapshot {
            handler(args);
        }
    }

    pub fn listeners(&self, event: &str) -> Vec<ListenerId> {
        self.registry
            .borrow()
            .callbacks
            .get(event)
            .map_or_else(Vec::new, |listeners| {
                listeners.iter().map(|&(id, _)| id).collect()
            })
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.registry
            .borrow()
            .callbacks
            .get(event)
            .is_some_and(|listeners| !listeners.is_empty())
    }
}

impl<A: ?Sized> Clone for Emitter<A> {
    fn clone(&self) -> Emitter<A> {
        Emitter {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<A: ?Sized> Default for Emitter<A> {
    fn default() -> Emitter<A> {
        Emitter::new()
    }
}

impl<A: ?Sized> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut events = registry
            .callbacks
            .iter()
            .map(|(name, listeners)| (name.as_str(), listeners.len()))
            .collect::<Vec<_>>();
        events.sort_unstable();
        f.debug_struct("Emitter").field("events", &events).finish()
    }
}
