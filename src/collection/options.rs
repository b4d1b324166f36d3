//! Construction options and the serialized form of a collection.

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Comparator kept by a sorted collection and re-applied after every mutation.
pub type SortFn = Rc<dyn Fn(&Value, &Value) -> Ordering>;

/// Builder for [`Collection::new`](super::Collection::new).
///
/// # Example
/// ```rust
/// use tul::collection::{Collection, CollectionOptions};
///
/// let files = Collection::new(CollectionOptions::new().keyfield("fileLocation"));
/// assert_eq!(files.keyfield(), Some("fileLocation"));
/// ```
#[derive(Clone, Default)]
pub struct CollectionOptions {
    pub(crate) keyfield: Option<String>,
    pub(crate) idx: u64,
    pub(crate) items: Map,
    pub(crate) sort_fn: Option<SortFn>,
}

impl CollectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive each item's key from the value at this dotted path.
    pub fn keyfield(mut self, path: impl Into<String>) -> Self {
        self.keyfield = Some(path.into());
        self
    }

    /// Starting value of the auto-key index. The next generated key uses `idx + 1`.
    pub fn idx(mut self, idx: u64) -> Self {
        self.idx = idx;
        self
    }

    /// Initial items, in iteration order.
    pub fn items(mut self, items: Map) -> Self {
        self.items = items;
        self
    }

    /// Keep the collection ordered by `cmp` after every `update` and `remove`.
    pub fn sort_fn(mut self, cmp: impl Fn(&Value, &Value) -> Ordering + 'static) -> Self {
        self.sort_fn = Some(Rc::new(cmp));
        self
    }
}

impl fmt::Debug for CollectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionOptions")
            .field("keyfield", &self.keyfield)
            .field("idx", &self.idx)
            .field("items", &self.items.len())
            .field("sorted", &self.sort_fn.is_some())
            .finish()
    }
}

/// Plain, serializable state of a collection.
///
/// Restoring from a snapshot resumes auto-key numbering at `idx`, so keys issued
/// before the snapshot are never reissued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    #[serde(default)]
    pub items: Map,
    #[serde(default)]
    pub idx: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyfield: Option<String>,
}

impl From<CollectionSnapshot> for CollectionOptions {
    fn from(snapshot: CollectionSnapshot) -> Self {
        Self {
            keyfield: snapshot.keyfield,
            idx: snapshot.idx,
            items: snapshot.items,
            sort_fn: None,
        }
    }
}
