//! # Observable Models
//!
//! A [`Model`] is a property bag that announces every write.
//!
//! - Reads and writes go through the dotted-path accessor ([`crate::path`]), so
//!   `account.get("user.name.first")` descends through nested models and plain objects.
//! - Every successful [`Model::set`] fires `"change"` and then `"change:<path>"`, both
//!   with the same [`ModelChange`] payload.
//!
//! ## Handle Semantics
//!
//! `Model` is a cheap [`Clone`] handle around shared state. Storing a model inside
//! another model stores the handle, not a copy, so a nested write is visible through
//! every handle. Handles are single-threaded (`!Send`, `!Sync`).
//!
//! Only the model whose `set` was called fires events: writing
//! `"user.name.first"` on an account notifies the account's listeners, not the
//! nested `name` model's.

use crate::events::{Emitter, EventEmitter};
use crate::path::{self, PathError};
use crate::value::{Map, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Payload of a model's `"change"` and `"change:<path>"` events.
#[derive(Debug, Clone)]
pub struct ModelChange {
    /// The model whose `set` was called.
    pub model: Model,
    /// The path as passed to `set`.
    pub prop: String,
    /// Previous value, `None` if the property did not exist.
    pub from: Option<Value>,
    pub to: Value,
}

struct ModelInner {
    props: RefCell<Map>,
    events: Emitter<ModelChange>,
}

/// Observable property bag.
#[derive(Clone)]
pub struct Model {
    inner: Rc<ModelInner>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::from(Map::new())
    }

    /// Creates a model holding `props` verbatim.
    ///
    /// # Example
    /// ```rust
    /// use tul::{Model, Value};
    ///
    /// let name = Model::from_props([("first", "Ricky"), ("last", "Pinstripe")]);
    /// assert_eq!(name.get("last"), Some(Value::from("Pinstripe")));
    /// ```
    pub fn from_props<K, V>(props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::from(
            props
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<Map>(),
        )
    }

    /// Value at `path`, or `None` if it does not resolve.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.with_props(|props| path::lookup(props, path))
    }

    /// Writes `value` at `path`, then fires `"change"` and `"change:<path>"`.
    ///
    /// Returns the previous value. Fails without firing anything if an intermediate
    /// segment of `path` does not exist.
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<Option<Value>, PathError> {
        let to = value.into();
        let from = self
            .write_path(path, path, to.clone())
            .inspect_err(|e| warn!(prop = path, error = %e, "set failed"))?;
        debug!(prop = path, from = ?from, to = ?to, "set");

        let change = ModelChange {
            model: self.clone(),
            prop: path.to_owned(),
            from: from.clone(),
            to,
        };
        self.fire("change", &change);
        self.fire(&format!("change:{path}"), &change);
        Ok(from)
    }

    /// Copy of the top-level property mapping.
    pub fn props(&self) -> Map {
        self.inner.props.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.props.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.props.borrow().is_empty()
    }

    /// True if both handles refer to the same model.
    pub fn ptr_eq(&self, other: &Model) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn with_props<R>(&self, f: impl FnOnce(&Map) -> R) -> R {
        f(&self.inner.props.borrow())
    }

    pub(crate) fn write_path(
        &self,
        path: &str,
        full: &str,
        value: Value,
    ) -> Result<Option<Value>, PathError> {
        let mut props = self.inner.props.borrow_mut();
        path::write_map(&mut props, path, full, value)
    }
}

impl EventEmitter for Model {
    type Event = ModelChange;

    fn emitter(&self) -> &Emitter<ModelChange> {
        &self.inner.events
    }
}

impl From<Map> for Model {
    fn from(props: Map) -> Self {
        Self {
            inner: Rc::new(ModelInner {
                props: RefCell::new(props),
                events: Emitter::new(),
            }),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Model");
        match self.inner.props.try_borrow() {
            Ok(props) => debug.field("props", &*props),
            Err(_) => debug.field("props", &"<borrowed>"),
        };
        debug.field("events", &self.inner.events).finish()
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_props(|props| props.serialize(serializer))
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Model::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn capture(model: &Model, event: &str) -> Rc<RefCell<Vec<ModelChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        model.on(event, move |change| sink.borrow_mut().push(change.clone()));
        seen
    }

    fn account() -> Model {
        let name = Model::from_props([("first", "Ricky"), ("last", "Pinstripe")]);
        let user = Model::from_props([("name", name)]);
        Model::from_props([
            ("user", Value::from(user)),
            ("permissions", Value::from(vec!["go", "return"])),
        ])
    }

    #[test]
    fn test_set_fires_change_event() {
        let name = Model::from_props([("first", "Ricky"), ("last", "Pinstripe")]);
        let changes = capture(&name, "change");

        let prev = name.set("last", "Boogaloo").unwrap();

        assert_eq!(prev, Some(Value::from("Pinstripe")));
        assert_eq!(name.get("last"), Some(Value::from("Boogaloo")));
        let changes = changes.borrow();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].model.ptr_eq(&name));
        assert_eq!(changes[0].prop, "last");
        assert_eq!(changes[0].from, Some(Value::from("Pinstripe")));
        assert_eq!(changes[0].to, Value::from("Boogaloo"));
    }

    #[test]
    fn test_set_fires_path_scoped_event_after_generic_one() {
        let model = Model::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let (a, b, c) = (order.clone(), order.clone(), order.clone());
        model.on("change", move |_| a.borrow_mut().push("change"));
        model.on("change:progress", move |_| b.borrow_mut().push("change:progress"));
        model.on("change:other", move |_| c.borrow_mut().push("change:other"));

        model.set("progress", 50).unwrap();
        assert_eq!(*order.borrow(), ["change", "change:progress"]);
    }

    #[test]
    fn test_falsy_values_are_preserved() {
        let m = Model::new();
        for falsy in [Value::from(0), Value::from(false), Value::from(""), Value::Null] {
            m.set("progress", falsy.clone()).unwrap();
            assert_eq!(m.get("progress"), Some(falsy));
        }
        assert_eq!(m.get("missing"), None);
    }

    #[test]
    fn test_recursive_get() {
        let account = account();
        assert_eq!(account.get("user.name.first"), Some(Value::from("Ricky")));
        assert_eq!(account.get("permissions"), Some(Value::from(json!(["go", "return"]))));
        assert_eq!(account.get("user.nickname.first"), None);
    }

    #[test]
    fn test_recursive_set_fires_once_on_the_root() {
        let account = account();
        let name = account.get("user.name").and_then(|v| v.as_model().cloned()).unwrap();
        let root_changes = capture(&account, "change");
        let leaf_changes = capture(&name, "change");

        account.set("user.name.first", "Barry").unwrap();

        assert_eq!(account.get("user.name.first"), Some(Value::from("Barry")));
        assert_eq!(name.get("first"), Some(Value::from("Barry")));
        assert_eq!(name.get("last"), Some(Value::from("Pinstripe")));

        let root_changes = root_changes.borrow();
        assert_eq!(root_changes.len(), 1);
        assert_eq!(root_changes[0].prop, "user.name.first");
        assert_eq!(root_changes[0].from, Some(Value::from("Ricky")));
        assert_eq!(root_changes[0].to, Value::from("Barry"));
        assert!(leaf_changes.borrow().is_empty());
    }

    #[test]
    fn test_set_through_missing_path_fails_without_event() {
        let account = account();
        let changes = capture(&account, "change");
        let err = account.set("user.address.street", "Elm").unwrap_err();
        assert!(matches!(err, PathError::NoSuchPath { .. }));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_initial_props_are_stored_verbatim() {
        let user = Model::from_props([("name", "Ricky")]);
        let m = Model::from_props([
            ("user", Value::from(user.clone())),
            ("permissions", Value::from(vec!["eat", "drink"])),
        ]);
        let stored = m.get("user").and_then(|v| v.as_model().cloned()).unwrap();
        assert!(stored.ptr_eq(&user));
        assert_eq!(stored.get("name"), Some(Value::from("Ricky")));
        assert_eq!(m.get("permissions"), Some(Value::from(vec!["eat", "drink"])));
    }

    #[test]
    fn test_listener_may_write_back_into_model() {
        let model = Model::from_props([("count", 0)]);
        let handle = model.clone();
        model.on("change:count", move |change| {
            handle.set("last_seen", change.to.clone()).unwrap();
        });

        model.set("count", 1).unwrap();
        assert_eq!(model.get("last_seen"), Some(Value::from(1)));
    }

    #[test]
    fn test_serde_round_trip() {
        let model = Model::from_props([("a", Value::from(0)), ("b", Value::Null)]);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#"{"a":0,"b":null}"#);
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back.props(), model.props());
    }
}
