//! Splits template source into text, placeholders and blocks.
//!
//! A block `{{name}}` pairs with its nearest unmatched `{{/name}}`: every further
//! `{{name}}` met on the way must be closed first. Bodies are parsed with the same
//! rules, so blocks nest freely, including inside blocks of the same name.

use super::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Text(String),
    /// `{path}`
    Placeholder(String),
    /// `{{name}}body{{/name}}`
    Block { name: String, body: Vec<Segment> },
}

pub(crate) fn parse(source: &str) -> Result<Vec<Segment>, TemplateError> {
    parse_at(source, 0)
}

fn parse_at(source: &str, base: usize) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find(OPEN) {
        let open = pos + found;
        push_text(&mut segments, &source[pos..open]);

        let name_start = open + OPEN.len();
        let name_end = source[name_start..]
            .find(CLOSE)
            .map(|len| name_start + len)
            .ok_or(TemplateError::UnterminatedTag { offset: base + open })?;
        let name = &source[name_start..name_end];

        if name.is_empty() {
            return Err(TemplateError::EmptyBlockName { offset: base + open });
        }
        if let Some(closed) = name.strip_prefix('/') {
            return Err(TemplateError::UnexpectedClose {
                name: closed.to_owned(),
                offset: base + open,
            });
        }

        let body_start = name_end + CLOSE.len();
        let open_tag = &source[open..body_start];
        let end_tag = format!("{OPEN}/{name}{CLOSE}");
        let body_end = find_close(source, body_start, open_tag, &end_tag).ok_or_else(|| {
            TemplateError::UnclosedBlock {
                name: name.to_owned(),
                offset: base + open,
            }
        })?;

        let body = parse_at(&source[body_start..body_end], base + body_start)?;
        segments.push(Segment::Block {
            name: name.to_owned(),
            body,
        });
        pos = body_end + end_tag.len();
    }

    push_text(&mut segments, &source[pos..]);
    Ok(segments)
}

/// Offset of the `end_tag` closing a block whose body starts at `from`.
fn find_close(source: &str, from: usize, open_tag: &str, end_tag: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = from;
    loop {
        let close = pos + source[pos..].find(end_tag)?;
        match source[pos..close].find(open_tag) {
            Some(nested) => {
                depth += 1;
                pos += nested + open_tag.len();
            }
            None if depth == 0 => return Some(close),
            None => {
                depth -= 1;
                pos = close + end_tag.len();
            }
        }
    }
}

/// Splits plain text into literal runs and `{path}` placeholders.
///
/// A `{` without a later `}`, and an empty `{}`, stay literal.
fn push_text(segments: &mut Vec<Segment>, text: &str) {
    let mut literal = String::new();
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(0) => {
                literal.push_str(&rest[..start + 2]);
                rest = &rest[start + 2..];
            }
            Some(len) => {
                literal.push_str(&rest[..start]);
                flush(segments, &mut literal);
                segments.push(Segment::Placeholder(after[..len].to_owned()));
                rest = &after[len + 1..];
            }
            None => break,
        }
    }

    literal.push_str(rest);
    flush(segments, &mut literal);
}

fn flush(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Text(std::mem::take(literal)));
    }
}
