//! Merging property mappings.

use crate::value::Map;

/// Copies every property of `source` into `target`, overwriting existing ones.
pub fn extend(target: &mut Map, source: &Map) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Copies the properties of `source` that `target` does not have yet.
pub fn defaults(target: &mut Map, source: &Map) {
    for (key, value) in source {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
        }
    }
}
