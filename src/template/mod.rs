//! # Templates
//!
//! Very small, unforgiving string templating.
//!
//! ## Syntax
//!
//! | Markup | Meaning |
//! |--------|---------|
//! | `{path}` | interpolate the value at `path` (dotted paths allowed) |
//! | `{.}` | interpolate the current value itself |
//! | `{{path}} ... {{/path}}` | render the body once per element of the value at `path` |
//! | `{{:x}} ... {{/:x}}` | anonymous block: iterate the current value itself |
//!
//! Any path that does not resolve falls back to the current value, which is what
//! makes `{.}` and `{{:x}}` work: nothing is stored under `"."` or `":x"`. A block whose
//! path resolves to `null` iterates the current value too.
//!
//! ```rust
//! use serde_json::json;
//! use tul::{template, Value};
//!
//! let data = Value::from(json!([
//!     {"name": "Pete", "likes": ["potato", "onion"]},
//!     {"name": "Frank", "likes": ["fish"]},
//! ]));
//! let html = template::render(
//!     "{{:x}}<p>{name} likes: {{likes}}<i>{.}</i>{{/likes}}</p>{{/:x}}",
//!     &data,
//! )
//! .unwrap();
//! assert_eq!(
//!     html,
//!     "<p>Pete likes: <i>potato</i><i>onion</i></p><p>Frank likes: <i>fish</i></p>"
//! );
//! ```
//!
//! ## Rules Worth Knowing
//!
//! - Blocks iterate arrays in order, collections in their current order, and objects
//!   and models over their property values. Iterating a scalar is an error.
//! - A block closes at its nearest unmatched `{{/name}}`, so a block may nest inside
//!   another of the same name. Sibling blocks may share a name too.
//! - Nested anonymous blocks sharing a marker (`{{:x}}` inside `{{:x}}`) each
//!   iterate their own current value; independent scopes are not addressable, so
//!   prefer distinct markers such as `{{:outer}}` / `{{:inner}}`.
//! - Falsy values interpolate literally: `0`, `false`, `null`.
//! - Whitespace is never trimmed.
//! - Output of a block is spliced in verbatim; it is not scanned for placeholders again.
//! - Malformed markup is an error, never partial output.

mod error;
mod parser;

pub use error::*;

use crate::path;
use crate::value::Value;
use parser::Segment;
use std::fmt::Write;
use std::str::FromStr;
use tracing::debug;

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            segments: parser::parse(source)?,
        })
    }

    /// Renders the template with `data` as the initial current value.
    pub fn render(&self, data: &Value) -> Result<String, TemplateError> {
        let mut out = String::new();
        render_segments(&self.segments, data, &mut out)?;
        debug!(data = data.kind(), len = out.len(), "Rendered template");
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

/// Parses and renders `source` in one go.
pub fn render(source: &str, data: &Value) -> Result<String, TemplateError> {
    Template::parse(source)?.render(data)
}

fn render_segments(segments: &[Segment], data: &Value, out: &mut String) -> Result<(), TemplateError> {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(prop) => {
                let resolved = path::get(data, prop);
                let value = resolved.as_ref().unwrap_or(data);
                write!(out, "{value}").map_err(|_| TemplateError::Format { path: prop.clone() })?;
            }
            Segment::Block { name, body } => {
                let resolved = path::get(data, name);
                let source = match &resolved {
                    Some(value) if !value.is_null() => value,
                    _ => data,
                };
                let items = source.iter_values().ok_or_else(|| TemplateError::NotIterable {
                    name: name.clone(),
                    kind: source.kind(),
                })?;
                for item in &items {
                    render_segments(body, item, out)?;
                }
            }
        }
    }
    Ok(())
}
