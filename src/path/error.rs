//! Error types for dotted-path access.

use thiserror::Error;

/// Errors that can occur while writing through a dotted path.
///
/// Reads never fail: an unresolvable read is simply `None`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PathError {
    /// An intermediate segment of the path is absent or holds a value without
    /// properties, so there is nothing to write into.
    #[error("No such property path: {path} (cannot descend into {segment:?})")]
    NoSuchPath { path: String, segment: String },
}

impl PathError {
    pub(crate) fn no_such_path(path: &str, segment: &str) -> Self {
        PathError::NoSuchPath {
            path: path.to_owned(),
            segment: segment.to_owned(),
        }
    }
}
