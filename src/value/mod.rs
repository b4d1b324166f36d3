//! # Dynamic Values
//!
//! Everything a [`Model`] stores, a [`Collection`] holds, or a template renders is a
//! [`Value`]. The enum is the typed replacement for "anything goes" data: plain data
//! (`Null`, `Bool`, `Number`, `String`, `Array`, `Object`) plus the two observable
//! containers, which appear as their own variants.
//!
//! ## Model-like vs Plain
//!
//! Path resolution needs to know whether it is looking at an observable container
//! or at plain structured data. That decision is made by matching on the variant:
//!
//! - [`Value::Model`] and [`Value::Collection`] are *model-like*: reads and writes go
//!   through the container's own accessors.
//! - [`Value::Object`] and [`Value::Array`] are *plain*: fields are indexed directly.
//!
//! ## Absence
//!
//! There is no `Undefined` variant. "No value" is `Option::<Value>::None`, which keeps
//! it distinct from every falsy value (`0`, `false`, `""`, `null`).
//!
//! ## Building Values
//!
//! Scalars, strings, vectors, maps, models and collections all convert with `into()`.
//! For nested literals, go through `serde_json::json!`:
//!
//! ```rust
//! use serde_json::json;
//! use tul::Value;
//!
//! let data = Value::from(json!({"people": ["Elliot", "Frankie"]}));
//! assert_eq!(tul::path::get(&data, "people.1"), Some(Value::from("Frankie")));
//! ```

mod format;
mod serde_impl;

use crate::collection::Collection;
use crate::model::Model;
use indexmap::IndexMap;
use paste::paste;

/// Ordered property mapping used by plain objects and models.
///
/// Insertion order is iteration order; overwriting an existing key keeps its position.
pub type Map = IndexMap<String, Value>;

/// A dynamically typed value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// Shared handle to an observable [`Model`].
    Model(Model),
    /// Shared handle to an observable [`Collection`].
    Collection(Collection),
}

macro_rules! variant_accessors {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        paste! {
            impl Value {
                $(
                    #[doc = concat!("Returns `true` if this is a `Value::", stringify!($variant), "`.")]
                    pub fn [<is_ $variant:snake>](&self) -> bool {
                        matches!(self, Value::$variant(_))
                    }

                    #[doc = concat!("Borrows the payload of a `Value::", stringify!($variant), "`.")]
                    pub fn [<as_ $variant:snake>](&self) -> Option<&$ty> {
                        match self {
                            Value::$variant(inner) => Some(inner),
                            _ => None,
                        }
                    }
                )*
            }
        }
    };
}

variant_accessors! {
    Bool => bool,
    Number => f64,
    String => String,
    Array => Vec<Value>,
    Object => Map,
    Model => Model,
    Collection => Collection,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String slice of a `Value::String`.
    pub fn as_str(&self) -> Option<&str> {
        self.as_string().map(String::as_str)
    }

    /// True for the observable containers, whose properties are reached through
    /// their own accessors rather than by indexing.
    pub fn is_model_like(&self) -> bool {
        matches!(self, Value::Model(_) | Value::Collection(_))
    }

    /// Short variant name, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Model(_) => "model",
            Value::Collection(_) => "collection",
        }
    }

    /// Elements visited when this value is iterated by a template block.
    ///
    /// Arrays yield their elements, collections their items in current order, and
    /// objects and models their property values. Scalars are not iterable.
    pub fn iter_values(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) => Some(items.clone()),
            Value::Collection(collection) => Some(collection.as_array()),
            Value::Object(map) => Some(map.values().cloned().collect()),
            Value::Model(model) => Some(model.props().into_values().collect()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Plain data compares structurally; models and collections compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Model(a), Value::Model(b)) => a.ptr_eq(b),
            (Value::Collection(a), Value::Collection(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        Value::Model(model)
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Collection(collection)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
