//! # Dotted-Path Access
//!
//! Resolves and writes properties addressed by paths such as `"user.name.first"`.
//! The same accessor backs [`Model::get`](crate::model::Model::get),
//! [`Model::set`](crate::model::Model::set), collection keyfields and template lookups,
//! so all of them agree on what a path means.
//!
//! ## Resolution Rules
//!
//! The path is split on its first `.` and resolved one segment at a time:
//!
//! | Current value | Segment lookup |
//! |---------------|----------------|
//! | `Model` | the model's own property mapping |
//! | `Collection` | the item stored under that key |
//! | `Object` | the field of that name |
//! | `Array` | the element at that index (segment must parse as `usize`) |
//! | anything else | absent |
//!
//! An absent value short-circuits the rest of the path: `get` returns `None`,
//! `set` fails with [`PathError::NoSuchPath`].

mod error;

pub use error::*;

use crate::value::{Map, Value};

/// Returns a copy of the value at `path`, or `None` if any segment is absent.
///
/// Models and collections are handles, so a resolved `Value::Model` still refers to
/// the live model.
pub fn get(root: &Value, path: &str) -> Option<Value> {
    match root {
        Value::Model(model) => model.with_props(|props| lookup(props, path)),
        Value::Collection(collection) => collection.with_items(|items| lookup(items, path)),
        Value::Object(map) => lookup(map, path),
        Value::Array(items) => {
            let (head, rest) = split(path);
            parse_index(head)
                .and_then(|index| items.get(index))
                .and_then(|next| descend(next, rest))
        }
        _ => None,
    }
}

/// Writes `value` at `path` and returns the value previously stored there.
///
/// No events are fired: this is the raw accessor. Use
/// [`Model::set`](crate::model::Model::set) for an observable write.
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<Option<Value>, PathError> {
    write(root, path, path, value)
}

/// Resolves `path` inside a property mapping.
pub(crate) fn lookup(map: &Map, path: &str) -> Option<Value> {
    let (head, rest) = split(path);
    map.get(head).and_then(|next| descend(next, rest))
}

/// Writes `value` at `path` inside a property mapping.
///
/// `full` is the path as the caller wrote it, kept for error reporting.
pub(crate) fn write_map(
    map: &mut Map,
    path: &str,
    full: &str,
    value: Value,
) -> Result<Option<Value>, PathError> {
    match split(path) {
        (head, None) => Ok(map.insert(head.to_owned(), value)),
        (head, Some(rest)) => match map.get_mut(head) {
            Some(next) => write(next, rest, full, value),
            None => Err(PathError::no_such_path(full, head)),
        },
    }
}

fn descend(next: &Value, rest: Option<&str>) -> Option<Value> {
    match rest {
        Some(rest) => get(next, rest),
        None => Some(next.clone()),
    }
}

fn write(root: &mut Value, path: &str, full: &str, value: Value) -> Result<Option<Value>, PathError> {
    match root {
        Value::Model(model) => model.write_path(path, full, value),
        Value::Collection(collection) => collection.write_path(path, full, value),
        Value::Object(map) => write_map(map, path, full, value),
        Value::Array(items) => {
            let (head, rest) = split(path);
            let index = parse_index(head).ok_or_else(|| PathError::no_such_path(full, head))?;
            match rest {
                Some(rest) => match items.get_mut(index) {
                    Some(next) => write(next, rest, full, value),
                    None => Err(PathError::no_such_path(full, head)),
                },
                None if index < items.len() => Ok(Some(std::mem::replace(&mut items[index], value))),
                None if index == items.len() => {
                    items.push(value);
                    Ok(None)
                }
                None => Err(PathError::no_such_path(full, head)),
            }
        }
        _ => Err(PathError::no_such_path(full, split(path).0)),
    }
}

fn split(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested_plain_object() {
        let data = Value::from(json!({"meta": {"title": "foo"}}));
        assert_eq!(get(&data, "meta.title"), Some(Value::from("foo")));
        assert_eq!(get(&data, "meta.missing"), None);
        assert_eq!(get(&data, "missing.title"), None);
    }

    #[test]
    fn test_get_short_circuits_on_absent_root() {
        let data = Value::from(json!({"a": null}));
        assert_eq!(get(&data, "a"), Some(Value::Null));
        assert_eq!(get(&data, "a.b.c"), None);
        assert_eq!(get(&Value::Null, "anything"), None);
    }

    #[test]
    fn test_get_array_index() {
        let data = Value::from(json!({"likes": ["fruit", "cake"]}));
        assert_eq!(get(&data, "likes.1"), Some(Value::from("cake")));
        assert_eq!(get(&data, "likes.2"), None);
        assert_eq!(get(&data, "likes.first"), None);
    }

    #[test]
    fn test_empty_segments_are_absent() {
        let data = Value::from("Elliot");
        assert_eq!(get(&data, "."), None);
        assert_eq!(get(&Value::from(json!({"a": 1})), "."), None);
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut data = Value::from(json!({"user": {"name": "Ricky"}}));
        let prev = set(&mut data, "user.name", Value::from("Barry")).unwrap();
        assert_eq!(prev, Some(Value::from("Ricky")));
        assert_eq!(get(&data, "user.name"), Some(Value::from("Barry")));

        let prev = set(&mut data, "user.age", Value::from(0)).unwrap();
        assert_eq!(prev, None);
        assert_eq!(get(&data, "user.age"), Some(Value::from(0)));
    }

    #[test]
    fn test_set_through_absent_intermediate_fails() {
        let mut data = Value::from(json!({"user": null}));
        let err = set(&mut data, "user.name.first", Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            PathError::NoSuchPath {
                path: "user.name.first".into(),
                segment: "name".into()
            }
        );

        let err = set(&mut data, "account.user", Value::from("x")).unwrap_err();
        assert!(matches!(err, PathError::NoSuchPath { ref segment, .. } if segment == "account"));
    }

    #[test]
    fn test_set_array_elements() {
        let mut data = Value::from(json!({"tags": ["a"]}));
        assert_eq!(set(&mut data, "tags.0", Value::from("b")).unwrap(), Some(Value::from("a")));
        assert_eq!(set(&mut data, "tags.1", Value::from("c")).unwrap(), None);
        assert!(set(&mut data, "tags.5", Value::from("d")).is_err());
        assert_eq!(data, Value::from(json!({"tags": ["b", "c"]})));
    }
}
