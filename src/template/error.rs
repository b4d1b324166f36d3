//! Error types for template parsing and rendering.

use thiserror::Error;

/// Errors raised by [`Template::parse`](super::Template::parse) and
/// [`Template::render`](super::Template::render).
///
/// Offsets are byte offsets into the template source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    /// A `{{` with no matching `}}`.
    #[error("Unterminated tag at offset {offset}")]
    UnterminatedTag { offset: usize },

    /// A `{{}}` tag.
    #[error("Empty block name at offset {offset}")]
    EmptyBlockName { offset: usize },

    /// `{{name}}` without a following `{{/name}}`.
    #[error("Block {name:?} opened at offset {offset} is never closed")]
    UnclosedBlock { name: String, offset: usize },

    /// `{{/name}}` without a preceding `{{name}}`.
    #[error("Closing tag for {name:?} at offset {offset} has no matching opening tag")]
    UnexpectedClose { name: String, offset: usize },

    /// A block resolved to a value that cannot be iterated.
    #[error("Block {name:?} cannot iterate a {kind} value")]
    NotIterable { name: String, kind: &'static str },

    /// A value's string form could not be produced.
    #[error("Failed to format value for {path:?}")]
    Format { path: String },
}
