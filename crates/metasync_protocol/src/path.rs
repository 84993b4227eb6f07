//! Evaluation of the paths the engine reports in `ErrorResponse::path`.
//!
//! Only plain field and index chains are ever produced, so this is a
//! small recursive-descent parser over that subset rather than full
//! JSONPath:
//!
//! ```text
//! path    := ["$"] [name] segment*
//! segment := "." name | "[" index "]" | "[" quoted "]"
//! ```
//!
//! `$.args[1].args.tables`, `args[1].args.tables` and `$['args'][1]` all
//! address the same node.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing a path expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A character that cannot start or continue a segment.
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),
    /// The expression ended inside a segment.
    #[error("unexpected end of path")]
    UnexpectedEnd,
    /// A bracketed index that is not a non-negative integer.
    #[error("invalid array index {0:?}")]
    InvalidIndex(String),
    /// A `.` not followed by a field name.
    #[error("empty field name at offset {0}")]
    EmptyName(usize),
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member access.
    Field(String),
    /// Array element access.
    Index(usize),
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let mut parser = Parser {
            input,
            pos: 0,
            segments: Vec::new(),
        };
        parser.parse_path()?;
        Ok(Self {
            segments: parser.segments,
        })
    }

    /// Returns the parsed segments. Empty for the root path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Looks up the addressed node, returning `None` if any step is missing.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match (segment, current) {
                (PathSegment::Field(name), Value::Object(map)) => map.get(name),
                (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
                _ => None,
            })
    }
}

/// Parses `path` and looks it up in `root`.
///
/// An unparseable path is reported the same way as a missing node.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    JsonPath::parse(path).ok()?.lookup(root)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    segments: Vec<PathSegment>,
}

impl Parser<'_> {
    fn parse_path(&mut self) -> Result<(), PathError> {
        if self.peek() == Some('$') {
            self.advance();
        } else if matches!(self.peek(), Some(c) if c != '.' && c != '[') {
            // Bare leading name, as in `args[1].args`.
            let name = self.parse_name()?;
            self.segments.push(PathSegment::Field(name));
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    let name = self.parse_name()?;
                    self.segments.push(PathSegment::Field(name));
                }
                '[' => {
                    self.advance();
                    let segment = self.parse_bracket()?;
                    self.segments.push(segment);
                }
                other => return Err(PathError::UnexpectedChar(other, self.pos)),
            }
        }
        Ok(())
    }

    fn parse_name(&mut self) -> Result<String, PathError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '.' || c == '[' {
                break;
            }
            if c == ']' || c == '$' {
                return Err(PathError::UnexpectedChar(c, self.pos));
            }
            self.advance();
        }
        if self.pos == start {
            return Err(PathError::EmptyName(start));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_bracket(&mut self) -> Result<PathSegment, PathError> {
        let segment = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.advance();
                PathSegment::Field(self.parse_quoted(quote)?)
            }
            Some(_) => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c != ']') {
                    self.advance();
                }
                let raw = self.input[start..self.pos].trim();
                let idx = raw
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidIndex(raw.to_string()))?;
                PathSegment::Index(idx)
            }
            None => return Err(PathError::UnexpectedEnd),
        };
        match self.peek() {
            Some(']') => {
                self.advance();
                Ok(segment)
            }
            Some(c) => Err(PathError::UnexpectedChar(c, self.pos)),
            None => Err(PathError::UnexpectedEnd),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, PathError> {
        let mut out = String::new();
        loop {
            match self.peek() {
                Some('\\') => {
                    self.advance();
                    let escaped = self.peek().ok_or(PathError::UnexpectedEnd)?;
                    out.push(escaped);
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(out);
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
                None => return Err(PathError::UnexpectedEnd),
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
}
