//! Config parsing.
//!
//! This module provides the [`Deserializer`] that reads an indented config
//! document into a [`Value`] shaped by a record type.
//!
//! ## Overview
//!
//! - **Line based**: blank lines and lines starting with `#` are skipped,
//!   every other line is `key: literal`, `key:`, `- literal` or `-`
//! - **Tab indentation**: a line's children are the lines directly below it
//!   indented with one more tab
//! - **Type directed**: which lines are allowed, and how literals are parsed,
//!   follows from the destination type
//! - **Positioned errors**: every error names the line it was found on
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use sconf::{from_str, record};
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Data {
//!         pub x: i32,
//!         pub y: i32,
//!     }
//! }
//!
//! let data: Data = from_str("x: 1\ny: 2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::schema::resolve;
use crate::{literal, Error, FieldMap, Kind, ParseOptions, RecordType, Result, Value};
use indexmap::IndexMap;

/// A significant line of the document.
#[derive(Clone, Copy, Debug)]
struct Line<'de> {
    /// 1-based line number in the input.
    number: usize,
    /// Number of leading tabs.
    depth: usize,
    /// The line without its indentation.
    content: &'de str,
}

/// The config parser.
///
/// Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    input: &'de str,
    path: String,
    options: ParseOptions,
    lines: Vec<Line<'de>>,
    position: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            path: String::new(),
            options: ParseOptions::default(),
            lines: Vec::new(),
            position: 0,
        }
    }

    /// Sets the path shown in error positions.
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses the whole document as the fields of a top level record.
    ///
    /// Fails with [`Error::NotARecord`] if `kind` is not a record kind.
    pub fn deserialize(&mut self, kind: &Kind) -> Result<Value> {
        let Kind::Record(record) = kind else {
            return Err(Error::NotARecord(kind.to_string()));
        };
        self.tokenize()?;
        self.position = 0;
        let value = self.parse_record(0, record, 1)?;
        if let Some(line) = self.lines.get(self.position) {
            return Err(self.error(line.number, Error::syntax("unexpected indentation")));
        }
        Ok(value)
    }

    fn error(&self, line: usize, err: Error) -> Error {
        Error::positioned(&self.path, line, err)
    }

    fn tokenize(&mut self) -> Result<()> {
        self.lines.clear();
        let input = self.input;
        for (index, raw) in input.lines().enumerate() {
            let number = index + 1;
            let content = raw.trim_start_matches('\t');
            let depth = raw.len() - content.len();
            if content.trim().is_empty() || content.trim_start().starts_with('#') {
                continue;
            }
            if content.starts_with(char::is_whitespace) {
                return Err(self.error(
                    number,
                    Error::syntax("indentation must use tabs, found other whitespace"),
                ));
            }
            self.lines.push(Line {
                number,
                depth,
                content,
            });
        }
        Ok(())
    }

    /// Returns the next line of a block at `depth`, or `None` at the end of the block.
    fn next_at(&mut self, depth: usize) -> Result<Option<Line<'de>>> {
        let Some(line) = self.lines.get(self.position).copied() else {
            return Ok(None);
        };
        if line.depth < depth {
            return Ok(None);
        }
        if line.depth > depth {
            return Err(self.error(line.number, Error::syntax("unexpected indentation")));
        }
        self.position += 1;
        Ok(Some(line))
    }

    /// Splits `key: literal` or `key:`.
    fn split_key(&self, line: &Line<'de>) -> Result<(&'de str, Option<&'de str>)> {
        let content = line.content;
        if let Some(index) = content.find(": ") {
            return Ok((&content[..index], Some(&content[index + 2..])));
        }
        if let Some(key) = content.strip_suffix(':') {
            return Ok((key, None));
        }
        Err(self.error(
            line.number,
            Error::syntax(format!("expected \"key: value\" or \"key:\", found {:?}", content)),
        ))
    }

    fn parse_record(&mut self, depth: usize, record: &RecordType, header: usize) -> Result<Value> {
        let fields = resolve(record).map_err(|e| self.error(header, e))?;
        let mut values: FieldMap = fields
            .iter()
            .map(|f| (f.name.to_string(), f.kind.zero_value()))
            .collect();
        let mut seen = vec![false; fields.len()];

        while let Some(line) = self.next_at(depth)? {
            let (key, text) = self.split_key(&line)?;
            let Some(index) = fields.iter().position(|f| f.name == key) else {
                return Err(self.error(line.number, Error::UnknownField(key.to_string())));
            };
            let value = self.parse_value(&line, text, &fields[index].kind)?;
            values.insert(key.to_string(), value);
            seen[index] = true;
        }

        if self.options.require_fields {
            if let Some(field) = fields
                .iter()
                .zip(&seen)
                .find(|(f, present)| !f.optional && !**present)
                .map(|(f, _)| f)
            {
                return Err(self.error(header, Error::MissingField(field.name.to_string())));
            }
        }
        Ok(Value::Record(values))
    }

    fn parse_sequence(&mut self, depth: usize, elem: &Kind) -> Result<Value> {
        let mut elems = Vec::new();
        while let Some(line) = self.next_at(depth)? {
            let text = match line.content.strip_prefix('-') {
                Some("") => None,
                Some(rest) => match rest.strip_prefix(' ') {
                    Some(text) => Some(text),
                    None => {
                        return Err(self.error(
                            line.number,
                            Error::syntax(format!("expected \"- value\", found {:?}", line.content)),
                        ))
                    }
                },
                None => {
                    return Err(self.error(
                        line.number,
                        Error::syntax(format!(
                            "expected list element starting with \"-\", found {:?}",
                            line.content
                        )),
                    ))
                }
            };
            elems.push(self.parse_value(&line, text, elem)?);
        }
        Ok(Value::Sequence(elems))
    }

    fn parse_mapping(&mut self, depth: usize, elem: &Kind) -> Result<Value> {
        let mut entries: IndexMap<String, Value> = IndexMap::new();
        while let Some(line) = self.next_at(depth)? {
            let (key, text) = self.split_key(&line)?;
            let value = match (elem, text) {
                (Kind::Record(_), Some("nil")) => elem.zero_value(),
                _ => self.parse_value(&line, text, elem)?,
            };
            entries.insert(key.to_string(), value);
        }
        Ok(Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (Value::String(k), v))
                .collect(),
        ))
    }

    /// Parses the value of `line`: its literal, or the block below it.
    fn parse_value(&mut self, line: &Line<'de>, text: Option<&'de str>, kind: &Kind) -> Result<Value> {
        match kind {
            Kind::Unsupported(name) => Err(self.error(
                line.number,
                Error::UnsupportedType(name.to_string()),
            )),
            Kind::Reference(inner) => {
                let target = self.parse_value(line, text, inner)?;
                Ok(Value::Reference(Some(Box::new(target))))
            }
            Kind::Record(record) => {
                self.expect_block(line, text, kind)?;
                self.parse_record(line.depth + 1, record, line.number)
            }
            Kind::Sequence(elem) => {
                self.expect_block(line, text, kind)?;
                self.parse_sequence(line.depth + 1, elem)
            }
            Kind::Mapping { key, value } => {
                if !matches!(**key, Kind::String) {
                    return Err(self.error(line.number, Error::KeyType(key.to_string())));
                }
                self.expect_block(line, text, kind)?;
                self.parse_mapping(line.depth + 1, value)
            }
            scalar => literal::parse_scalar(scalar, text.unwrap_or(""))
                .map_err(|e| self.error(line.number, e)),
        }
    }

    fn expect_block(&self, line: &Line<'de>, text: Option<&str>, kind: &Kind) -> Result<()> {
        match text {
            Some(text) if !text.trim().is_empty() => Err(self.error(
                line.number,
                Error::syntax(format!(
                    "unexpected value {:?} for {}, expected an indented block",
                    text, kind
                )),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Schema};
    use std::collections::BTreeMap;

    fn record(fields: fn() -> Vec<Field>) -> Kind {
        Kind::Record(RecordType::new("Test", fields))
    }

    fn parse(input: &str, kind: &Kind) -> Result<Value> {
        Deserializer::from_str(input).deserialize(kind)
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let kind = record(|| vec![Field::new("A", i32::kind())]);
        let value = parse("# comment\n\n\t\nA: 5\n", &kind).unwrap();
        assert_eq!(value.as_record().unwrap().get("A"), Some(&Value::Int(5)));
    }

    #[test]
    fn absent_fields_are_zero() {
        let kind = record(|| {
            vec![Field::new("A", i32::kind()), Field::new("B", String::kind())]
        });
        let value = parse("B: x", &kind).unwrap();
        assert_eq!(value.as_record().unwrap().get("A"), Some(&Value::Int(0)));
    }

    #[test]
    fn unknown_key_is_positioned() {
        let kind = record(|| vec![Field::new("A", i32::kind())]);
        let err = parse("A: 1\nB: 2", &kind).unwrap_err();
        assert_eq!(err.to_string(), ":2: unknown key \"B\"");
    }

    #[test]
    fn indentation_jump_is_rejected() {
        let kind = record(|| {
            vec![Field::new("S", Kind::Record(RecordType::new("S", || {
                vec![Field::new("A", i32::kind())]
            })))]
        });
        let err = parse("S:\n\t\tA: 1", &kind).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(matches!(err.unpositioned(), Error::Syntax(_)));
    }

    #[test]
    fn scalar_with_block_is_rejected() {
        let kind = record(|| vec![Field::new("A", i32::kind())]);
        let err = parse("A: 1\n\tB: 2", &kind).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn spaces_are_not_indentation() {
        let kind = record(|| vec![Field::new("A", i32::kind())]);
        let err = parse("  A: 1", &kind).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn sequence_lines_need_dash() {
        let kind = record(|| vec![Field::new("L", Vec::<i32>::kind())]);
        let value = parse("L:\n\t- 1\n\t- 2", &kind).unwrap();
        assert_eq!(
            value.as_record().unwrap().get("L"),
            Some(&Value::Sequence(vec![Value::Int(1), Value::Int(2)]))
        );
        let err = parse("L:\n\tx: 1", &kind).unwrap_err();
        assert_eq!(err.line(), Some(2));
        let err = parse("L:\n\t-1", &kind).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn mapping_nil_only_for_records() {
        let inner = || {
            Kind::Record(RecordType::new("Inner", || {
                vec![Field::new("Word", String::kind()).optional()]
            }))
        };
        let kind = Kind::Record(RecordType::new("Outer", || {
            vec![Field::new(
                "Map",
                Kind::Mapping {
                    key: Box::new(Kind::String),
                    value: Box::new(Kind::Record(RecordType::new("Inner", || {
                        vec![Field::new("Word", String::kind()).optional()]
                    }))),
                },
            )]
        }));
        let value = parse("Map:\n\ta: nil", &kind).unwrap();
        let map = value.as_record().unwrap().get("Map").unwrap();
        assert_eq!(map.get_entry("a"), Some(&inner().zero_value()));

        let strings = record(|| vec![Field::new("Map", BTreeMap::<String, String>::kind())]);
        let value = parse("Map:\n\ta: nil", &strings).unwrap();
        let map = value.as_record().unwrap().get("Map").unwrap();
        assert_eq!(map.get_entry("a"), Some(&Value::from("nil")));
    }

    #[test]
    fn reference_to_record_rejects_nil() {
        let kind = record(|| {
            vec![Field::new(
                "P",
                Kind::Reference(Box::new(Kind::Record(RecordType::new("P", || {
                    vec![Field::new("A", bool::kind())]
                })))),
            )]
        });
        let err = parse("P: nil", &kind).unwrap_err();
        assert!(matches!(err.unpositioned(), Error::Syntax(_)));

        let value = parse("P:\n\tA: true", &kind).unwrap();
        assert!(!value.as_record().unwrap().get("P").unwrap().is_zero());
    }

    #[test]
    fn strict_mode_reports_missing_fields() {
        let kind = record(|| {
            vec![
                Field::new("A", i32::kind()),
                Field::new("B", i32::kind()).optional(),
            ]
        });
        let mut de = Deserializer::from_str("B: 1").with_options(ParseOptions::strict());
        let err = de.deserialize(&kind).unwrap_err();
        assert_eq!(err.to_string(), ":1: missing required key \"A\"");

        let mut de = Deserializer::from_str("A: 1").with_options(ParseOptions::strict());
        assert!(de.deserialize(&kind).is_ok());
    }

    #[test]
    fn path_is_shown_in_errors() {
        let kind = record(|| vec![Field::new("A", bool::kind())]);
        let mut de = Deserializer::from_str("A: yes").with_path("app.conf");
        let err = de.deserialize(&kind).unwrap_err();
        assert_eq!(err.to_string(), "app.conf:1: cannot parse \"yes\" as bool");
    }

    #[test]
    fn unsupported_type_fails_on_visit() {
        let kind = record(|| vec![Field::new("c", Kind::Unsupported("complex128"))]);
        let err = parse("c: 123", &kind).unwrap_err();
        assert_eq!(err.to_string(), ":1: unsupported type complex128");
        assert!(parse("", &kind).is_ok());
    }
}
