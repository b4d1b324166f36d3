//! # Observable Collections
//!
//! A [`Collection`] maps string keys to items and fires an event for every mutation:
//!
//! | Operation | Event | Payload |
//! |-----------|-------|---------|
//! | `update` on a new key | `"add"` | [`CollectionEvent::Add`] |
//! | `update` on an existing key | `"change"` | [`CollectionEvent::Change`] |
//! | `remove` | `"remove"` | [`CollectionEvent::Remove`] (fired even if the key was absent) |
//!
//! ## Keys
//!
//! - With a **keyfield**, the key is the string form of the value at that dotted path
//!   inside the item, so two items with the same keyfield value share one slot.
//! - Without one, keys are generated as `<8 random hex chars>-<idx>`, where `idx` is a
//!   counter owned by the collection. The counter is part of the
//!   [`CollectionSnapshot`], so a restored collection keeps numbering where the
//!   exported one stopped.
//!
//! ## Ordering
//!
//! Items iterate in insertion order unless a sort function is configured, in which
//! case the order is re-established after every `update` and `remove`, before the
//! event fires. Sorting permutes order only: a key always maps to the same item.
//!
//! The sort function runs while the collection is borrowed and must not call back
//! into the collection.

mod error;
mod options;

pub use error::*;
pub use options::*;

use crate::events::{Emitter, EventEmitter};
use crate::path::{self, PathError};
use crate::util;
use crate::value::{Map, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Payload of collection events.
#[derive(Debug, Clone)]
pub enum CollectionEvent {
    /// An item was stored under a key that was previously free.
    Add {
        collection: Collection,
        key: String,
        item: Value,
    },
    /// An item replaced the one stored under `key`.
    Change {
        collection: Collection,
        key: String,
        from: Value,
        to: Value,
    },
    /// `key` was removed; `item` is what was stored there, if anything.
    Remove {
        collection: Collection,
        key: String,
        item: Option<Value>,
    },
}

impl CollectionEvent {
    /// Event name this payload is fired under.
    pub fn name(&self) -> &'static str {
        match self {
            CollectionEvent::Add { .. } => "add",
            CollectionEvent::Change { .. } => "change",
            CollectionEvent::Remove { .. } => "remove",
        }
    }

    pub fn collection(&self) -> &Collection {
        match self {
            CollectionEvent::Add { collection, .. }
            | CollectionEvent::Change { collection, .. }
            | CollectionEvent::Remove { collection, .. } => collection,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            CollectionEvent::Add { key, .. }
            | CollectionEvent::Change { key, .. }
            | CollectionEvent::Remove { key, .. } => key,
        }
    }
}

struct State {
    items: Map,
    idx: u64,
}

struct CollectionInner {
    state: RefCell<State>,
    keyfield: Option<String>,
    sort_fn: Option<SortFn>,
    events: Emitter<CollectionEvent>,
}

/// Observable keyed collection. Cloning yields another handle to the same collection.
#[derive(Clone)]
pub struct Collection {
    inner: Rc<CollectionInner>,
}

impl Collection {
    pub fn new(options: CollectionOptions) -> Self {
        let collection = Self {
            inner: Rc::new(CollectionInner {
                state: RefCell::new(State {
                    items: options.items,
                    idx: options.idx,
                }),
                keyfield: options.keyfield,
                sort_fn: options.sort_fn,
                events: Emitter::new(),
            }),
        };
        collection.resort(&mut collection.inner.state.borrow_mut());
        collection
    }

    /// Rebuilds a collection from exported state.
    pub fn from_snapshot(snapshot: CollectionSnapshot) -> Self {
        Self::new(snapshot.into())
    }

    /// Stores `item` under a key derived from the keyfield, or a freshly generated
    /// key, and returns that key.
    pub fn update(&self, item: impl Into<Value>) -> Result<String, CollectionError> {
        let item = item.into();
        let key = self
            .next_key(&item)
            .inspect_err(|e| warn!(keyfield = ?self.keyfield(), error = %e, "update failed"))?;
        self.store(key.clone(), item);
        Ok(key)
    }

    /// Stores `item` under an explicit `key`, bypassing key derivation.
    pub fn update_keyed(&self, key: impl Into<String>, item: impl Into<Value>) {
        self.store(key.into(), item.into());
    }

    /// Removes the item under `key` and fires `"remove"`, returning the removed item.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let item = {
            let mut state = self.inner.state.borrow_mut();
            let item = state.items.shift_remove(key);
            self.resort(&mut state);
            item
        };
        debug!(key, found = item.is_some(), size = self.len(), "Removed");

        self.fire(
            "remove",
            &CollectionEvent::Remove {
                collection: self.clone(),
                key: key.to_owned(),
                item: item.clone(),
            },
        );
        item
    }

    /// Calls `f(item, key, items)` for every item in current order.
    ///
    /// Iterates over a snapshot, so `f` may mutate the collection.
    pub fn for_each(&self, mut f: impl FnMut(&Value, &str, &Map)) {
        let items = self.inner.state.borrow().items.clone();
        for (key, item) in &items {
            f(item, key, &items);
        }
    }

    /// Items in current order, without their keys.
    pub fn as_array(&self) -> Vec<Value> {
        self.inner.state.borrow().items.values().cloned().collect()
    }

    /// First item, in current order, for which `test(item, key, items)` holds.
    pub fn find(&self, mut test: impl FnMut(&Value, &str, &Map) -> bool) -> Option<Value> {
        let items = self.inner.state.borrow().items.clone();
        items
            .iter()
            .find(|(key, item)| test(item, key, &items))
            .map(|(_, item)| item.clone())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.state.borrow().items.get(key).cloned()
    }

    /// Reorders items with a three-way comparator. Equal items keep their relative order.
    pub fn sort_by(&self, cmp: impl Fn(&Value, &Value) -> Ordering) {
        let mut state = self.inner.state.borrow_mut();
        state.items.sort_by(|_, a, _, b| cmp(a, b));
        debug!(size = state.items.len(), "Sorted");
    }

    /// Current value of the auto-key counter.
    pub fn idx(&self) -> u64 {
        self.inner.state.borrow().idx
    }

    pub fn keyfield(&self) -> Option<&str> {
        self.inner.keyfield.as_deref()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.state.borrow().items.keys().cloned().collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.state.borrow().items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().items.is_empty()
    }

    /// True if both handles refer to the same collection.
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Exports items, counter and keyfield. The sort function is not exported.
    pub fn snapshot(&self) -> CollectionSnapshot {
        let state = self.inner.state.borrow();
        CollectionSnapshot {
            items: state.items.clone(),
            idx: state.idx,
            keyfield: self.inner.keyfield.clone(),
        }
    }

    pub(crate) fn with_items<R>(&self, f: impl FnOnce(&Map) -> R) -> R {
        f(&self.inner.state.borrow().items)
    }

    pub(crate) fn write_path(
        &self,
        path: &str,
        full: &str,
        value: Value,
    ) -> Result<Option<Value>, PathError> {
        let mut state = self.inner.state.borrow_mut();
        let previous = path::write_map(&mut state.items, path, full, value)?;
        self.resort(&mut state);
        Ok(previous)
    }

    fn next_key(&self, item: &Value) -> Result<String, CollectionError> {
        if let Some(keyfield) = &self.inner.keyfield {
            return path::get(item, keyfield)
                .map(|key| key.to_string())
                .ok_or_else(|| CollectionError::MissingKey {
                    keyfield: keyfield.clone(),
                });
        }

        let mut state = self.inner.state.borrow_mut();
        let idx = state.idx + 1;
        let key = util::keygen(idx)?;
        state.idx = idx;
        Ok(key)
    }

    fn store(&self, key: String, item: Value) {
        let previous = {
            let mut state = self.inner.state.borrow_mut();
            let previous = state.items.insert(key.clone(), item.clone());
            self.resort(&mut state);
            previous
        };

        let event = match previous {
            None => CollectionEvent::Add {
                collection: self.clone(),
                key,
                item,
            },
            Some(from) => CollectionEvent::Change {
                collection: self.clone(),
                key,
                from,
                to: item,
            },
        };
        debug!(key = event.key(), event = event.name(), size = self.len(), "Stored");
        self.fire(event.name(), &event);
    }

    fn resort(&self, state: &mut State) {
        if let Some(cmp) = &self.inner.sort_fn {
            state.items.sort_by(|_, a, _, b| cmp(a, b));
        }
    }
}

impl EventEmitter for Collection {
    type Event = CollectionEvent;

    fn emitter(&self) -> &Emitter<CollectionEvent> {
        &self.inner.events
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(CollectionOptions::default())
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Collection");
        match self.inner.state.try_borrow() {
            Ok(state) => debug.field("items", &state.items).field("idx", &state.idx),
            Err(_) => debug.field("items", &"<borrowed>"),
        };
        debug
            .field("keyfield", &self.inner.keyfield)
            .field("sorted", &self.inner.sort_fn.is_some())
            .finish()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CollectionSnapshot::deserialize(deserializer).map(Collection::from_snapshot)
    }
}
