//! Config writing.
//!
//! This module provides the [`Serializer`] that turns a record value into an
//! indented config document.
//!
//! ## Overview
//!
//! - **Records** write one `Name: value` line per field, nested records and
//!   collections continue on the following lines, one tab deeper
//! - **Sequences** write one `- value` line per element
//! - **Mappings** write one `key: value` line per entry, sorted by key
//! - **References** write their target, or the zero value of the target when absent
//!
//! What else is written depends on the [`Mode`](crate::Mode):
//!
//! | | Full | Compact | Documented |
//! |---|---|---|---|
//! | optional fields that are zero | written | left out | left out |
//! | doc comments | written | no | written |
//! | empty sequence | one example element | error, unless left out | same as compact |
//! | vacuous record in a mapping | written | `nil` | `nil` |
//!
//! An empty mapping is always written with one example entry under key `x`,
//! so that readers of the file can see what an entry looks like.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use sconf::record;
//!
//! record! {
//!     #[derive(Default)]
//!     pub struct Data {
//!         pub x: i32,
//!         pub tags: Vec<String>,
//!     }
//! }
//!
//! let data = Data { x: 1, tags: vec!["a".into(), "b".into()] };
//! let mut out = Vec::new();
//! sconf::write(&mut out, &data).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "x: 1\ntags:\n\t- a\n\t- b\n");
//! ```

use crate::schema::{is_vacuous, resolve};
use crate::wrap::comment_lines;
use crate::{literal, Error, Field, FieldMap, Kind, RecordType, Result, Value, WriteOptions};
use std::borrow::Cow;

/// The config writer.
///
/// Writes into an internal buffer, retrieved with [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: WriteOptions,
    indent_level: usize,
    /// Field names and mapping keys leading to the value being written.
    path: Vec<String>,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
            path: Vec::new(),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the fields of a top level record.
    ///
    /// Fails with [`Error::NotARecord`] if `kind` is not a record kind.
    pub fn serialize(&mut self, value: &Value, kind: &Kind) -> Result<()> {
        match (kind, value) {
            (Kind::Record(record), Value::Record(fields)) => self.write_record(fields, record),
            (Kind::Record(record), other) => {
                Err(Error::type_mismatch(record.name(), other.kind_name()))
            }
            (kind, _) => Err(Error::NotARecord(kind.to_string())),
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push('\t');
        }
    }

    fn location(&self) -> String {
        if self.path.is_empty() {
            "config".to_string()
        } else {
            self.path.join(".")
        }
    }

    fn write_record(&mut self, values: &FieldMap, record: &RecordType) -> Result<()> {
        let fields = resolve(record)?;
        for field in &fields {
            let value = match values.get(field.name) {
                Some(value) => Cow::Borrowed(value),
                None => Cow::Owned(field.kind.zero_value()),
            };
            if !self.options.mode.keep_zero() && field.optional && value.is_zero() {
                continue;
            }
            if self.options.mode.docs() && (field.doc.is_some() || field.optional) {
                self.write_doc(field);
            }
            self.write_indent();
            self.output.push_str(field.name);
            self.output.push(':');
            self.path.push(field.name.to_string());
            self.write_value(&value, &field.kind)?;
            self.path.pop();
        }
        Ok(())
    }

    fn write_doc(&mut self, field: &Field) {
        let mut text = field.doc.unwrap_or_default().to_string();
        if field.optional {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str("(optional)");
        }

        // A blank line separates the comment from whatever came before it.
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let width = self.options.wrap_width.saturating_sub(2).max(1);
        for line in comment_lines(&text, width) {
            if !line.is_empty() {
                self.write_indent();
                self.output.push_str("# ");
                self.output.push_str(&line);
            }
            self.output.push('\n');
        }
    }

    /// Writes the rest of a line after `key:` or `-`, and any nested block.
    fn write_value(&mut self, value: &Value, kind: &Kind) -> Result<()> {
        match (kind, value) {
            (Kind::Unsupported(name), _) => Err(Error::UnsupportedType(name.to_string())),
            (Kind::Record(record), Value::Record(fields)) => {
                self.output.push('\n');
                self.indent_level += 1;
                self.write_record(fields, record)?;
                self.indent_level -= 1;
                Ok(())
            }
            (Kind::Sequence(elem), Value::Sequence(elems)) => {
                self.output.push('\n');
                self.indent_level += 1;
                self.write_sequence(elems, elem)?;
                self.indent_level -= 1;
                Ok(())
            }
            (Kind::Mapping { key, value: elem }, Value::Mapping(entries)) => {
                if !matches!(**key, Kind::String) {
                    return Err(Error::KeyType(key.to_string()));
                }
                self.output.push('\n');
                self.indent_level += 1;
                self.write_mapping(entries, elem)?;
                self.indent_level -= 1;
                Ok(())
            }
            (Kind::Reference(inner), Value::Reference(Some(target))) => {
                self.write_value(target, inner)
            }
            (Kind::Reference(inner), Value::Reference(None)) => {
                self.write_value(&inner.zero_value(), inner)
            }
            (kind, value) if kind.is_scalar() => {
                let text = literal::format_scalar(value, kind)
                    .map_err(|e| self.in_context(e))?;
                self.output.push(' ');
                self.output.push_str(&text);
                self.output.push('\n');
                Ok(())
            }
            (kind, value) => Err(Error::type_mismatch(kind, value.kind_name())),
        }
    }

    fn in_context(&self, err: Error) -> Error {
        match err {
            Error::UnsupportedValue(msg) => {
                Error::UnsupportedValue(format!("{} at {}", msg, self.location()))
            }
            err => err,
        }
    }

    fn write_sequence(&mut self, elems: &[Value], elem: &Kind) -> Result<()> {
        if elems.is_empty() {
            if !self.options.mode.keep_zero() {
                return Err(Error::NoElements(self.location()));
            }
            self.write_indent();
            self.output.push('-');
            return self.write_value(&elem.zero_value(), elem);
        }

        for value in elems {
            self.write_indent();
            self.output.push('-');
            self.write_value(value, elem)?;
        }
        Ok(())
    }

    fn write_mapping(&mut self, entries: &[(Value, Value)], elem: &Kind) -> Result<()> {
        if entries.is_empty() {
            self.write_indent();
            self.output.push_str("x:");
            self.path.push("x".to_string());
            self.write_value(&elem.zero_value(), elem)?;
            self.path.pop();
            return Ok(());
        }

        let mut sorted: Vec<(&str, &Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key = key
                .as_str()
                .ok_or_else(|| Error::KeyType(key.kind_name().to_string()))?;
            self.check_key(key)?;
            sorted.push((key, value));
        }
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let vacuous_fields = match elem {
            Kind::Record(record) if !self.options.mode.keep_zero() => Some(resolve(record)?),
            _ => None,
        };

        for (key, value) in sorted {
            self.write_indent();
            self.output.push_str(key);
            self.output.push(':');
            if let Some(fields) = &vacuous_fields {
                if is_vacuous(value, fields) {
                    self.output.push_str(" nil\n");
                    continue;
                }
            }
            self.path.push(key.to_string());
            self.write_value(value, elem)?;
            self.path.pop();
        }
        Ok(())
    }

    /// Rejects mapping keys the parser would read back differently.
    fn check_key(&self, key: &str) -> Result<()> {
        let unreadable = key.contains(['\n', '\r'])
            || key.contains(": ")
            || key.ends_with(':')
            || key.starts_with('#')
            || key.starts_with(char::is_whitespace);
        if unreadable {
            return Err(Error::UnsupportedValue(format!(
                "mapping key {:?} at {}",
                key,
                self.location()
            )));
        }
        Ok(())
    }
}
