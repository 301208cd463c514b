//! Tolerant parser for the restricted YAML subset written into note frontmatter.
//!
//! Supported: `key: value` scalars, single- or double-quoted scalars, inline sequences
//! (`[a, "b"]`), flow sequences spanning several lines, block sequences (`- item` lines) with one
//! level of nested continuation, folded multi-line scalars, blank lines and `#` comments.
//! Anything else is skipped rather than rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, mem};

/// Values that mark a field as intentionally unset.
pub const NULL_SENTINELS: &[&str] = &["", "null", "None"];

pub fn is_null_sentinel(value: &str) -> bool {
    NULL_SENTINELS.contains(&value.trim())
}

static KEY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*):(\s.*)?$").expect("static key pattern is valid")
});

/// A parsed frontmatter value.
///
/// A key written with list syntax is always a [`FieldValue::List`], even when it holds zero or
/// one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value.as_str()),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            FieldValue::Scalar(_) => None,
        }
    }

    /// True for null sentinels and empty lists.
    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Scalar(value) => is_null_sentinel(value),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// The individual values held: one for a scalar, each element for a list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Scalar(value) => vec![value.as_str()],
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Scalar(value) => f.write_str(value),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

pub type FieldMap = BTreeMap<String, FieldValue>;

/// The declared note type, or `""` when absent or not a scalar.
pub fn note_type(fields: &FieldMap) -> &str {
    fields
        .get("type")
        .and_then(FieldValue::as_scalar)
        .map(str::trim)
        .unwrap_or("")
}

/// How a line of the header block reads, independent of parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Comment,
    /// `key: value` at zero indentation.
    Key { key: &'a str, value: &'a str },
    /// A line starting with `-`; `raw` is the trimmed line, `text` the part after the dash.
    Item { raw: &'a str, text: &'a str },
    /// An indented line that is neither an item nor a comment.
    Continuation(&'a str),
    /// An unindented line that is not a key.
    Stray(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') {
        return LineKind::Comment;
    }
    let indented = line.starts_with(' ') || line.starts_with('\t');
    if !indented {
        if let Some(caps) = KEY_LINE.captures(line) {
            let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            return LineKind::Key { key, value };
        }
    }
    if let Some(text) = trimmed.strip_prefix('-') {
        return LineKind::Item {
            raw: trimmed,
            text: text.trim(),
        };
    }
    if indented {
        LineKind::Continuation(trimmed)
    } else {
        LineKind::Stray(trimmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceStyle {
    /// Opened with `[` and waiting for `]`.
    Flow,
    /// `- item` lines under a key with no inline value.
    Block,
}

#[derive(Debug, Default)]
enum ParseState {
    #[default]
    Idle,
    Scalar {
        key: String,
        parts: Vec<String>,
    },
    Sequence {
        key: String,
        items: Vec<String>,
        style: SequenceStyle,
    },
}

#[derive(Debug, Default)]
struct FieldParser {
    fields: FieldMap,
    state: ParseState,
}

impl FieldParser {
    fn feed(&mut self, line: &str) {
        match classify(line) {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Key { key, value } => self.on_key(key, value),
            LineKind::Item { raw, text } => self.on_item(raw, text),
            LineKind::Continuation(text) => self.on_continuation(text),
            LineKind::Stray(text) => self.on_stray(text),
        }
    }

    fn on_key(&mut self, key: &str, value: &str) {
        self.commit();
        let key = key.to_string();
        if value.starts_with('[') && !value.starts_with("[[") {
            if value.len() > 1 && value.ends_with(']') {
                let items = split_flow(&value[1..value.len() - 1]);
                self.fields.insert(key, FieldValue::List(items));
            } else {
                self.state = ParseState::Sequence {
                    key,
                    items: split_flow(&value[1..]),
                    style: SequenceStyle::Flow,
                };
            }
        } else {
            let parts = if value.is_empty() {
                vec![]
            } else {
                vec![value.to_string()]
            };
            self.state = ParseState::Scalar { key, parts };
        }
    }

    fn on_item(&mut self, raw: &str, text: &str) {
        match &mut self.state {
            ParseState::Sequence {
                items,
                style: SequenceStyle::Flow,
                ..
            } => {
                let (text, closes) = split_at_close(text);
                push_item(items, text.trim_end_matches(','));
                if closes {
                    self.commit();
                }
            }
            ParseState::Sequence {
                items,
                style: SequenceStyle::Block,
                ..
            } => push_item(items, text),
            ParseState::Scalar { key, parts } if parts.is_empty() => {
                let mut items = Vec::new();
                push_item(&mut items, text);
                self.state = ParseState::Sequence {
                    key: mem::take(key),
                    items,
                    style: SequenceStyle::Block,
                };
            }
            ParseState::Scalar { parts, .. } => parts.push(raw.to_string()),
            ParseState::Idle => tracing::trace!("ignoring list item outside of a key: {raw}"),
        }
    }

    fn on_continuation(&mut self, text: &str) {
        match &mut self.state {
            ParseState::Scalar { parts, .. } => parts.push(text.to_string()),
            ParseState::Sequence {
                style: SequenceStyle::Flow,
                ..
            } => self.on_flow_text(text),
            ParseState::Sequence {
                items,
                style: SequenceStyle::Block,
                ..
            } => match items.last_mut() {
                Some(last) => {
                    last.push(' ');
                    last.push_str(&unquote(text));
                }
                None => push_item(items, text),
            },
            ParseState::Idle => tracing::trace!("ignoring continuation outside of a key: {text}"),
        }
    }

    fn on_stray(&mut self, text: &str) {
        if let ParseState::Sequence {
            style: SequenceStyle::Flow,
            ..
        } = self.state
        {
            self.on_flow_text(text);
        } else {
            tracing::trace!("ignoring unrecognised frontmatter line: {text}");
        }
    }

    fn on_flow_text(&mut self, text: &str) {
        let (content, closes) = split_at_close(text);
        if let ParseState::Sequence { items, .. } = &mut self.state {
            items.extend(split_flow(content));
        }
        if closes {
            self.commit();
        }
    }

    fn commit(&mut self) {
        match mem::take(&mut self.state) {
            ParseState::Idle => {}
            ParseState::Scalar { key, parts } => {
                self.fields
                    .insert(key, FieldValue::Scalar(unquote(&parts.join(" "))));
            }
            ParseState::Sequence { key, items, .. } => {
                self.fields.insert(key, FieldValue::List(items));
            }
        }
    }

    fn finish(mut self) -> FieldMap {
        self.commit();
        self.fields
    }
}

/// Parse an isolated frontmatter block into a field mapping.
///
/// Never fails: unrecognised lines are skipped. A repeated key keeps its last value.
pub fn parse_fields(block: &str) -> FieldMap {
    let mut parser = FieldParser::default();
    for line in block.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Strip one pair of matching surrounding quotes and surrounding whitespace.
pub fn unquote(value: &str) -> String {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].trim().to_string();
        }
    }
    trimmed.to_string()
}

fn split_flow(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(unquote)
        .filter(|item| !item.is_empty())
        .collect()
}

fn push_item(items: &mut Vec<String>, text: &str) {
    let item = unquote(text);
    if !item.is_empty() {
        items.push(item);
    }
}

/// Splits flow-sequence text at its closing bracket, if present.
fn split_at_close(text: &str) -> (&str, bool) {
    match text.rfind(']') {
        Some(idx) if !text[..=idx].ends_with("]]") => (&text[..idx], true),
        _ => (text, false),
    }
}
