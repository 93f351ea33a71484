//! # sconf
//!
//! Simple configuration files for Rust records: indentation based, typed by
//! the record they are parsed into, and documented inline.
//!
//! ## What does a config look like?
//!
//! ```text
//! # Name of the service, shown in logs.
//! Name: mail
//! Listeners:
//! 	public:
//! 		Port: 25
//! 		Hosts:
//! 			- mx.example.org
//! 	internal: nil
//! # Time to wait for clients. (optional)
//! Timeout: 1m30s
//! ```
//!
//! Every line is `Key: value`, `Key:` followed by an indented block, or a
//! `- value` element of a list. Blocks are indented with one tab per level.
//! Lines starting with `#` are comments. There is no quoting: strings run to
//! the end of the line.
//!
//! ## Key Features
//!
//! - **Typed**: the record type decides which keys are allowed and how each
//!   value is parsed, errors name the offending line
//! - **Self-documenting**: doc text on fields is written as comments, so a
//!   written config explains itself
//! - **Example configs**: [`describe`] writes every field including zero
//!   values and empty collections, giving a complete example of the format
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use sconf::{from_str, record, to_string, Mode};
//! use std::time::Duration;
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Config {
//!         #[sconf(rename = "Name", doc = "Name of the service.")]
//!         pub name: String,
//!         #[sconf(rename = "Timeout", optional)]
//!         pub timeout: Duration,
//!         #[sconf(rename = "Hosts")]
//!         pub hosts: Vec<String>,
//!     }
//! }
//!
//! let config = Config {
//!     name: "mail".to_string(),
//!     timeout: Duration::from_secs(90),
//!     hosts: vec!["mx.example.org".to_string()],
//! };
//!
//! let text = to_string(&config, Mode::Compact).unwrap();
//! assert_eq!(text, "Name: mail\nTimeout: 1m30s\nHosts:\n\t- mx.example.org\n");
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(back, config);
//! ```
//!
//! ## Modes
//!
//! | function | [`Mode`] | zero optional fields | doc comments |
//! |---|---|---|---|
//! | [`describe`] | [`Mode::Full`] | written | written |
//! | [`write`] | [`Mode::Compact`] | left out | no |
//! | [`write_docs`] | [`Mode::Documented`] | left out | written |
//!
//! ## Types
//!
//! Types implement [`Schema`]. Implementations are provided for `bool`,
//! integers, floats, `String`, `PathBuf`, `Duration`, `Vec<T>` (lists),
//! `Option<T>` (values that may be absent), `Box<T>` and maps with string
//! keys. Records are declared with [`record!`] or implement [`Schema`] by
//! hand, see [`schema`].

pub mod de;
pub mod error;
mod impls;
pub mod literal;
pub mod macros;
pub mod map;
pub mod options;
pub mod schema;
pub mod ser;
pub mod value;
pub mod wrap;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::FieldMap;
pub use options::{Mode, ParseOptions, WriteOptions};
pub use schema::{Field, Kind, RecordType, Schema};
pub use ser::Serializer;
pub use value::Value;

use std::fs::File;
use std::io;
use std::path::Path;

/// Writes an example config for `value`: every field, including zero values,
/// with doc comments.
///
/// Empty lists are written with one zero element and empty maps with one
/// zero entry, so the output shows the complete structure and can be parsed
/// back.
///
/// # Errors
///
/// Returns an error if `T` is not a record, contains types that cannot be
/// written, or the writer fails.
pub fn describe<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Schema,
{
    to_writer_with_options(writer, value, &WriteOptions::full())
}

/// Writes `value` without doc comments, leaving out optional fields that are zero.
///
/// # Examples
///
/// ```rust
/// use sconf::record;
///
/// record! {
///     pub struct Point {
///         pub x: i32,
///         #[sconf(optional)]
///         pub y: i32,
///     }
/// }
///
/// let mut buffer = Vec::new();
/// sconf::write(&mut buffer, &Point { x: 1, y: 0 }).unwrap();
/// assert_eq!(buffer, b"x: 1\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` is not a record, a required list is empty, a
/// value cannot be written, or the writer fails.
pub fn write<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Schema,
{
    to_writer_with_options(writer, value, &WriteOptions::new())
}

/// Writes `value` with doc comments, leaving out optional fields that are zero.
///
/// # Errors
///
/// Same as [`write`].
pub fn write_docs<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Schema,
{
    to_writer_with_options(writer, value, &WriteOptions::documented())
}

/// Writes `value` to a string in the given mode.
///
/// # Errors
///
/// Returns an error if `value` cannot be written, see [`write`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Schema>(value: &T, mode: Mode) -> Result<String> {
    to_string_with_options(value, &WriteOptions::new().with_mode(mode))
}

/// Writes `value` to a string with custom options.
///
/// # Errors
///
/// Returns an error if `value` cannot be written, see [`write`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Schema>(value: &T, options: &WriteOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize(&value.to_value(), &T::kind())?;
    Ok(serializer.into_inner())
}

/// Writes `value` to a writer with custom options.
///
/// Nothing is written if `value` cannot be written completely.
///
/// # Errors
///
/// Returns an error if `value` cannot be written or the writer fails.
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &WriteOptions) -> Result<()>
where
    W: io::Write,
    T: Schema,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Converts `value` to a dynamic [`Value`].
///
/// # Examples
///
/// ```rust
/// use sconf::{record, to_value, Value};
///
/// record! {
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// let value = to_value(&Point { x: 1, y: 2 });
/// assert_eq!(value.as_record().and_then(|r| r.get("y")), Some(&Value::Int(2)));
/// ```
#[must_use]
pub fn to_value<T: Schema>(value: &T) -> Value {
    value.to_value()
}

/// Converts a dynamic [`Value`] into `T`.
///
/// # Errors
///
/// Returns an error if `value` does not have the shape of `T`, or a number
/// does not fit.
pub fn from_value<T: Schema>(value: Value) -> Result<T> {
    T::from_value(value)
}

/// Parses a config from `reader` into `dest`.
///
/// Errors are positioned as `:line: message`, without a path. On error,
/// `dest` is left unchanged.
///
/// # Errors
///
/// Returns an error if reading fails or the config is not valid for `T`.
pub fn parse<R, T>(reader: R, dest: &mut T) -> Result<()>
where
    R: io::Read,
    T: Schema,
{
    parse_with_options(reader, dest, &ParseOptions::default())
}

/// Parses a config from `reader` into `dest` with custom options.
///
/// # Errors
///
/// Returns an error if reading fails or the config is not valid for `T`.
pub fn parse_with_options<R, T>(mut reader: R, dest: &mut T, options: &ParseOptions) -> Result<()>
where
    R: io::Read,
    T: Schema,
{
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    *dest = from_str_with_options(&input, options)?;
    Ok(())
}

/// Parses the config file at `path` into `dest`.
///
/// Errors are positioned as `path:line: message`. Failure to open the file
/// is returned as [`Error::Io`] as is.
///
/// # Examples
///
/// ```rust,no_run
/// use sconf::record;
///
/// record! {
///     #[derive(Default)]
///     pub struct Config {
///         pub name: String,
///     }
/// }
///
/// let mut config = Config::default();
/// sconf::parse_file("service.conf", &mut config)?;
/// # Ok::<(), sconf::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or the config is not valid for `T`.
pub fn parse_file<P, T>(path: P, dest: &mut T) -> Result<()>
where
    P: AsRef<Path>,
    T: Schema,
{
    let path = path.as_ref();
    let mut input = String::new();
    io::Read::read_to_string(&mut File::open(path)?, &mut input)?;
    let mut deserializer = Deserializer::from_str(&input).with_path(&path.to_string_lossy());
    let value = deserializer.deserialize(&T::kind())?;
    *dest = T::from_value(value)?;
    Ok(())
}

/// Parses a config of type `T` from a string.
///
/// # Examples
///
/// ```rust
/// use sconf::{from_str, record};
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the config is not valid for `T`. Error messages
/// include the line number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: Schema>(s: &str) -> Result<T> {
    from_str_with_options(s, &ParseOptions::default())
}

/// Parses a config of type `T` from a string with custom options.
///
/// # Errors
///
/// Returns an error if the config is not valid for `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T: Schema>(s: &str, options: &ParseOptions) -> Result<T> {
    let mut deserializer = Deserializer::from_str(s).with_options(options.clone());
    let value = deserializer.deserialize(&T::kind())?;
    T::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Point {
            x: i32,
            y: i32,
        }
    }

    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Service {
            #[sconf(doc = "Service name.")]
            name: String,
            #[sconf(optional)]
            port: u16,
            tags: BTreeMap<String, bool>,
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: -2 };
        let text = to_string(&point, Mode::Compact).unwrap();
        assert_eq!(text, "x: 1\ny: -2\n");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_modes() {
        let service = Service {
            name: "web".to_string(),
            ..Service::default()
        };

        let mut full = Vec::new();
        describe(&mut full, &service).unwrap();
        assert_eq!(
            String::from_utf8(full).unwrap(),
            "# Service name.\nname: web\n\n# (optional)\nport: 0\ntags:\n\tx: false\n"
        );

        let mut compact = Vec::new();
        write(&mut compact, &service).unwrap();
        assert_eq!(String::from_utf8(compact).unwrap(), "name: web\ntags:\n\tx: false\n");

        let mut docs = Vec::new();
        write_docs(&mut docs, &service).unwrap();
        assert_eq!(
            String::from_utf8(docs).unwrap(),
            "# Service name.\nname: web\ntags:\n\tx: false\n"
        );
    }

    #[test]
    fn test_parse_replaces_destination() {
        let mut point = Point { x: 5, y: 6 };
        parse("x: 1".as_bytes(), &mut point).unwrap();
        assert_eq!(point, Point { x: 1, y: 0 });
    }

    #[test]
    fn test_parse_error_keeps_destination() {
        let mut point = Point { x: 5, y: 6 };
        let err = parse("x: 1\nz: 2".as_bytes(), &mut point).unwrap_err();
        assert_eq!(err.to_string(), ":2: unknown key \"z\"");
        assert_eq!(point, Point { x: 5, y: 6 });
    }

    #[test]
    fn test_parse_file_missing() {
        let mut point = Point::default();
        let err = parse_file("/nonexistent/sconf/test.conf", &mut point).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_not_a_record() {
        let err = to_string(&5i32, Mode::Full).unwrap_err();
        assert!(matches!(err, Error::NotARecord(_)));
        let err = from_str::<String>("a: b").unwrap_err();
        assert!(matches!(err, Error::NotARecord(_)));
    }

    #[test]
    fn test_to_value_round_trip() {
        let point = Point { x: 3, y: 4 };
        let back: Point = from_value(to_value(&point)).unwrap();
        assert_eq!(back, point);
    }
}
