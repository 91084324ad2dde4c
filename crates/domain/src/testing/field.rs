//! Field paths: where in a response an assertion looks.
//!
//! Body selectors use a small GPath-like grammar:
//!
//! | selector | meaning |
//! |---|---|
//! | `a.b` | object member; on an array, collects the member of every element |
//! | `[i]`, `a[i]` | i-th array element |
//! | `size()` | element count of an array (members of an object, chars of a string) |
//! | `find { it.id == 11 }` | first array element whose `id` equals the JSON literal `11` |
//!
//! Missing members, out-of-range indexes and unmatched `find` filters resolve
//! to `null` rather than failing, so the comparison decides the outcome.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operator::json_eq;
use crate::error::{DomainError, DomainResult};
use crate::response::ResponseSpec;

/// A selector locating a value within a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum FieldPath {
    /// The HTTP status code, as a JSON number.
    Status,
    /// The `Content-Type` header value, lowercased.
    ContentType,
    /// Any response header, looked up case-insensitively.
    Header(String),
    /// A location inside the parsed JSON body.
    Body(BodyPath),
}

impl FieldPath {
    /// Parses a body selector into a field path.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldPath` if the selector is malformed.
    pub fn body(selector: &str) -> DomainResult<Self> {
        selector.parse().map(Self::Body)
    }

    /// Resolves this path against a response.
    #[must_use]
    pub fn resolve(&self, response: &ResponseSpec) -> Value {
        match self {
            Self::Status => Value::from(response.status),
            Self::ContentType => response.media_type().map_or(Value::Null, Value::String),
            Self::Header(name) => response
                .headers
                .get(name)
                .map_or(Value::Null, |v| Value::String(v.to_string())),
            Self::Body(path) => path.resolve(&response.body),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => write!(f, "status"),
            Self::ContentType => write!(f, "content-type"),
            Self::Header(name) => write!(f, "header '{name}'"),
            Self::Body(path) if path.is_root() => write!(f, "body"),
            Self::Body(path) if path.as_str().starts_with('[') => write!(f, "body{path}"),
            Self::Body(path) => write!(f, "body.{path}"),
        }
    }
}

/// One step of a body selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Object member by name.
    Member(String),
    /// Array element by position.
    Index(usize),
    /// Number of elements.
    Size,
    /// First array element matching a filter.
    Find(FindFilter),
}

/// Condition of a `find { it.<path> == <literal> }` selector.
#[derive(Debug, Clone, PartialEq)]
pub struct FindFilter {
    /// Path resolved against each candidate element.
    pub path: Vec<Segment>,
    /// Value the resolved path must equal.
    pub expected: Value,
}

/// A parsed body selector.
///
/// Keeps the selector as written for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BodyPath {
    raw: String,
    segments: Vec<Segment>,
}

impl BodyPath {
    /// Selector for the whole body.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            raw: String::new(),
            segments: Vec::new(),
        }
    }

    /// Returns true if this selects the whole body.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the selector as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolves this selector against a JSON document.
    #[must_use]
    pub fn resolve(&self, body: &Value) -> Value {
        resolve_segments(&self.segments, body)
    }
}

impl fmt::Display for BodyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for BodyPath {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let raw = s.trim();
        let segments = Parser::new(raw)
            .parse_path()
            .map_err(|reason| DomainError::invalid_field_path(raw, reason))?;
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }
}

impl TryFrom<String> for BodyPath {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<BodyPath> for String {
    fn from(value: BodyPath) -> Self {
        value.raw
    }
}

fn resolve_segments(segments: &[Segment], value: &Value) -> Value {
    let mut current = value.clone();
    for segment in segments {
        current = resolve_segment(segment, &current);
    }
    current
}

fn resolve_segment(segment: &Segment, value: &Value) -> Value {
    match segment {
        Segment::Member(name) => member(value, name),
        Segment::Index(index) => match value {
            Value::Array(items) => items.get(*index).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        },
        Segment::Size => match value {
            Value::Array(items) => Value::from(items.len()),
            Value::Object(map) => Value::from(map.len()),
            Value::String(s) => Value::from(s.chars().count()),
            _ => Value::Null,
        },
        Segment::Find(filter) => match value {
            Value::Array(items) => items
                .iter()
                .find(|item| json_eq(&resolve_segments(&filter.path, item), &filter.expected))
                .cloned()
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
    }
}

fn member(value: &Value, name: &str) -> Value {
    match value {
        Value::Object(map) => map.get(name).cloned().unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(items.iter().map(|item| member(item, name)).collect()),
        _ => Value::Null,
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn parse_path(&mut self) -> Result<Vec<Segment>, String> {
        let mut segments = Vec::new();
        let mut expect_separator = false;

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }

            if rest.starts_with('[') {
                segments.push(self.parse_index()?);
                expect_separator = true;
                continue;
            }

            if expect_separator {
                if !rest.starts_with('.') {
                    return Err(format!("expected '.' or '[' at offset {}", self.pos));
                }
                self.pos += 1;
                self.skip_whitespace();
                if self.rest().is_empty() {
                    return Err("selector ends with '.'".to_string());
                }
            }

            segments.push(self.parse_step()?);
            expect_separator = true;
        }

        Ok(segments)
    }

    fn parse_index(&mut self) -> Result<Segment, String> {
        let rest = self.rest();
        let close = rest
            .find(']')
            .ok_or_else(|| format!("unclosed '[' at offset {}", self.pos))?;
        let inner = rest[1..close].trim();
        let index = inner
            .parse::<usize>()
            .map_err(|_| format!("invalid array index '{inner}'"))?;
        self.pos += close + 1;
        Ok(Segment::Index(index))
    }

    fn parse_step(&mut self) -> Result<Segment, String> {
        let rest = self.rest();

        if let Some(after) = rest.strip_prefix("size()") {
            self.pos += rest.len() - after.len();
            return Ok(Segment::Size);
        }

        if let Some(after) = rest.strip_prefix("find") {
            if after.trim_start().starts_with('{') {
                return self.parse_find();
            }
        }

        let end = rest
            .find(|c: char| c == '.' || c == '[' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..end];
        if name.is_empty() {
            return Err(format!("empty member name at offset {}", self.pos));
        }
        if name.contains(['{', '}', '(', ')', ']']) {
            return Err(format!("unexpected character in member '{name}'"));
        }
        self.pos += end;
        Ok(Segment::Member(name.to_string()))
    }

    fn parse_find(&mut self) -> Result<Segment, String> {
        let rest = self.rest();
        let open = rest.find('{').ok_or("missing '{' after find")?;
        let close = open + closing_brace(&rest[open..]).ok_or("unclosed find filter")?;
        let condition = rest[open + 1..close].trim();
        self.pos += close + 1;

        let (left, right) = condition
            .split_once("==")
            .ok_or_else(|| format!("find filter '{condition}' must use '=='"))?;

        let left = left.trim();
        let path = if left == "it" {
            Vec::new()
        } else {
            let inner = left
                .strip_prefix("it.")
                .ok_or_else(|| format!("find filter must start with 'it', got '{left}'"))?;
            Parser::new(inner).parse_path()?
        };

        Ok(Segment::Find(FindFilter {
            path,
            expected: parse_literal(right.trim())?,
        }))
    }
}

/// Byte offset of the `}` closing a filter, skipping quoted literals.
fn closing_brace(filter: &str) -> Option<usize> {
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in filter.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '}' => return Some(i),
            None => {}
        }
    }
    None
}

/// Parses a filter literal: any JSON literal, or a single-quoted string.
fn parse_literal(literal: &str) -> Result<Value, String> {
    if let Some(inner) = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
    {
        return Ok(Value::String(inner.to_string()));
    }
    serde_json::from_str(literal).map_err(|_| format!("invalid literal '{literal}'"))
}
