//! # Events
//!
//! Synchronous publish/subscribe for models, collections and any other type that
//! wants it.
//!
//! ## Components
//!
//! - [`Emitter`]: the registry itself, mapping event names to ordered listener lists.
//! - [`EventEmitter`]: a trait with provided `on` / `off` / `fire` methods. A type
//!   gains the capability by owning an [`Emitter`] and returning it from
//!   [`EventEmitter::emitter`]; no base type is involved.
//! - [`Listener`]: the handle returned by `on`, used again to `off` that registration.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tul::events::{Emitter, EventEmitter};
//!
//! struct Door {
//!     events: Emitter<&'static str>,
//! }
//!
//! impl EventEmitter for Door {
//!     type Event = &'static str;
//!     fn emitter(&self) -> &Emitter<&'static str> {
//!         &self.events
//!     }
//! }
//!
//! let door = Door { events: Emitter::new() };
//! let opened = Rc::new(Cell::new(0));
//! let counter = opened.clone();
//! let listener = door.on("open", move |_| counter.set(counter.get() + 1));
//!
//! door.fire("open", &"front");
//! door.off("open", &listener);
//! door.fire("open", &"front");
//! assert_eq!(opened.get(), 1);
//! ```
//!
//! ## Firing Semantics
//!
//! - Listeners run synchronously, in registration order, on the caller's stack.
//! - `fire` works on a snapshot of the listener list. Listeners added or removed while
//!   a pass is running take effect from the next `fire`.
//! - No borrow is held while listeners run, so a listener may re-enter the emitter
//!   (or the model that owns it) freely.
//! - A panicking listener is not caught: the rest of the pass is skipped and the
//!   panic unwinds into whoever triggered the event.
//!
//! ## Reaching the Emitter
//!
//! Listeners receive only the payload. An emitter whose listeners need the object
//! that fired puts a handle to it in the payload: [`ModelChange::model`] and
//! [`CollectionEvent::collection`] do exactly that, and other emitters should follow
//! suit.
//!
//! [`ModelChange::model`]: crate::model::ModelChange::model
//! [`CollectionEvent::collection`]: crate::collection::CollectionEvent::collection

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A registered callback. Compare registrations with [`Rc::ptr_eq`].
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Per-object listener registry.
pub struct Emitter<E> {
    listeners: RefCell<IndexMap<String, Vec<Listener<E>>>>,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(IndexMap::new()),
        }
    }

    /// Registers `listener` for `event` and returns its handle.
    pub fn on(&self, event: &str, listener: impl Fn(&E) + 'static) -> Listener<E> {
        let listener: Listener<E> = Rc::new(listener);
        self.add(event, listener.clone());
        listener
    }

    /// Registers an existing handle, e.g. one listener shared by several events.
    pub fn add(&self, event: &str, listener: Listener<E>) {
        self.listeners
            .borrow_mut()
            .entry(event.to_owned())
            .or_default()
            .push(listener);
    }

    /// Removes the first registration of `listener` for `event`.
    ///
    /// Returns `false` if it was not registered.
    pub fn off(&self, event: &str, listener: &Listener<E>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(registered) = listeners.get_mut(event) else {
            return false;
        };
        match registered.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(index) => {
                registered.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invokes every listener registered for `event`, in order.
    pub fn fire(&self, event: &str, payload: &E) {
        let snapshot = match self.listeners.borrow().get(event) {
            Some(registered) if !registered.is_empty() => registered.clone(),
            _ => return,
        };
        trace!(event, listeners = snapshot.len(), "fire");
        for listener in snapshot {
            listener(payload);
        }
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.borrow().get(event).map_or(0, Vec::len)
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_map()
            .entries(listeners.iter().map(|(event, l)| (event, l.len())))
            .finish()
    }
}

/// Event capability, attachable to any type that owns an [`Emitter`].
///
/// # Provided Methods
/// Only [`EventEmitter::emitter`] needs implementing; `on`, `off` and `fire`
/// delegate to it.
pub trait EventEmitter {
    /// Payload passed to listeners.
    type Event: 'static;

    /// The registry backing this object.
    fn emitter(&self) -> &Emitter<Self::Event>;

    /// Registers a listener. Keep the returned handle to remove it later.
    fn on(&self, event: &str, listener: impl Fn(&Self::Event) + 'static) -> Listener<Self::Event> {
        self.emitter().on(event, listener)
    }

    /// Removes the first registration of `listener` for `event`.
    fn off(&self, event: &str, listener: &Listener<Self::Event>) -> bool {
        self.emitter().off(event, listener)
    }

    /// Synchronously invokes the listeners for `event`.
    fn fire(&self, event: &str, payload: &Self::Event) {
        self.emitter().fire(event, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn Fn(&u32)>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let make = move |name: &'static str| -> Box<dyn Fn(&u32)> {
            let sink = sink.clone();
            Box::new(move |n: &u32| sink.borrow_mut().push(format!("{name}:{n}")))
        };
        (calls, make)
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let emitter = Emitter::<u32>::new();
        let (calls, make) = recorder();
        emitter.on("tick", make("L1"));
        emitter.on("tick", make("L2"));
        emitter.on("tick", make("L3"));
        emitter.on("other", make("X"));

        emitter.fire("tick", &7);
        assert_eq!(*calls.borrow(), ["L1:7", "L2:7", "L3:7"]);
    }

    #[test]
    fn test_fire_without_listeners_is_noop() {
        let emitter = Emitter::<u32>::new();
        emitter.fire("nothing", &1);
        assert_eq!(emitter.listener_count("nothing"), 0);
    }

    #[test]
    fn test_off_removes_first_matching_registration_only() {
        let emitter = Emitter::<u32>::new();
        let (calls, make) = recorder();
        let twice: Listener<u32> = Rc::from(make("twice"));
        emitter.add("tick", twice.clone());
        emitter.add("tick", twice.clone());

        assert!(emitter.off("tick", &twice));
        emitter.fire("tick", &1);
        assert_eq!(*calls.borrow(), ["twice:1"]);

        assert!(emitter.off("tick", &twice));
        assert!(!emitter.off("tick", &twice));
        assert!(!emitter.off("unknown", &twice));
    }

    #[test]
    fn test_removal_during_fire_applies_to_next_pass() {
        let emitter = Rc::new(Emitter::<u32>::new());
        let (calls, make) = recorder();
        let second: Listener<u32> = Rc::from(make("second"));

        let handle = emitter.clone();
        let victim = second.clone();
        emitter.on("tick", move |_| {
            handle.off("tick", &victim);
        });
        emitter.add("tick", second);

        emitter.fire("tick", &1);
        emitter.fire("tick", &2);
        assert_eq!(*calls.borrow(), ["second:1"]);
    }

    #[derive(Clone)]
    struct Counter {
        inner: Rc<(Cell<u32>, Emitter<Tick>)>,
    }

    struct Tick {
        counter: Counter,
    }

    impl EventEmitter for Counter {
        type Event = Tick;

        fn emitter(&self) -> &Emitter<Tick> {
            &self.inner.1
        }
    }

    impl Counter {
        fn bump(&self) {
            self.inner.0.set(self.inner.0.get() + 1);
            self.fire("tick", &Tick { counter: self.clone() });
        }
    }

    #[test]
    fn test_listener_reaches_emitter_through_payload() {
        let counter = Counter {
            inner: Rc::new((Cell::new(0), Emitter::new())),
        };
        counter.on("tick", |tick| {
            if tick.counter.inner.0.get() < 3 {
                tick.counter.bump();
            }
        });

        counter.bump();
        assert_eq!(counter.inner.0.get(), 3);
    }
}
