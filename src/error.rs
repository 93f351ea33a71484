//! Error types for sconf encoding and decoding.
//!
//! Every encode or decode call either succeeds completely or returns a single
//! [`Error`]. There is no partial result.
//!
//! ## Error Categories
//!
//! - **Schema errors**: a type cannot be represented ([`Error::UnsupportedType`],
//!   [`Error::KeyType`], [`Error::NotARecord`])
//! - **Value errors**: a representable type holds a value the format cannot
//!   express ([`Error::UnsupportedValue`], [`Error::NoElements`])
//! - **Document errors**: problems found while reading a config file
//!   ([`Error::UnknownField`], [`Error::Overflow`], [`Error::MalformedLiteral`],
//!   [`Error::Syntax`], [`Error::MissingField`])
//! - **I/O errors**: passed through from the underlying reader or writer
//!
//! ## Positions
//!
//! Errors found while decoding are wrapped in [`Error::Positioned`], which
//! renders as `path:line: message`. The path is empty when decoding from a
//! plain reader.
//!
//! ```rust
//! use sconf::{from_str, record, Error};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Limits {
//!         pub count: i32,
//!     }
//! }
//!
//! let err = from_str::<Limits>("count: 999999999999999999999").unwrap_err();
//! assert_eq!(err.line(), Some(1));
//! assert!(matches!(err.unpositioned(), Error::Overflow { .. }));
//! assert!(err.to_string().starts_with(":1: "));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while writing or parsing a config.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error during reading or writing, passed through unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The top level value is not a record.
    #[error("top level object must be a record, is a {0}")]
    NotARecord(String),

    /// A field's type cannot be represented in a config file.
    #[error("unsupported type {0}")]
    UnsupportedType(String),

    /// A representable type holds a value the format cannot express.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A mapping's key type is not textual.
    #[error("map key must be string, is {0}")]
    KeyType(String),

    /// A required sequence has no elements when writing.
    #[error("{0}: no elements")]
    NoElements(String),

    /// A key in the document does not name a field of the record.
    #[error("unknown key {0:?}")]
    UnknownField(String),

    /// A required field is absent from the document (strict parsing only).
    #[error("missing required key {0:?}")]
    MissingField(String),

    /// An integer or float literal does not fit the destination type.
    #[error("value {literal:?} out of range for {ty}")]
    Overflow { literal: String, ty: String },

    /// A literal cannot be parsed for its destination type.
    #[error("cannot parse {literal:?} as {expected}")]
    MalformedLiteral { literal: String, expected: String },

    /// A line does not have the shape its container requires.
    #[error("{0}")]
    Syntax(String),

    /// A value does not match the kind its type describes.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A decoding error with the source path and 1-based line number.
    #[error("{path}:{line}: {source}")]
    Positioned {
        path: String,
        line: usize,
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches a document position to an error.
    ///
    /// Errors that already carry a position, and I/O errors, are returned as is.
    pub fn positioned(path: &str, line: usize, err: Error) -> Self {
        match err {
            Error::Positioned { .. } | Error::Io(_) => err,
            err => Error::Positioned {
                path: path.to_string(),
                line,
                source: Box::new(err),
            },
        }
    }

    /// Returns the error without its position, if it has one.
    #[must_use]
    pub fn unpositioned(&self) -> &Error {
        match self {
            Error::Positioned { source, .. } => source.unpositioned(),
            err => err,
        }
    }

    /// Returns the 1-based line number of a decoding error.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Positioned { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Creates a [`Error::MalformedLiteral`].
    pub fn malformed(literal: &str, expected: impl fmt::Display) -> Self {
        Error::MalformedLiteral {
            literal: literal.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates an [`Error::Overflow`].
    pub fn overflow(literal: &str, ty: impl fmt::Display) -> Self {
        Error::Overflow {
            literal: literal.to_string(),
            ty: ty.to_string(),
        }
    }

    /// Creates a [`Error::TypeMismatch`].
    pub fn type_mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a [`Error::Syntax`] error with a display message.
    pub fn syntax<T: fmt::Display>(msg: T) -> Self {
        Error::Syntax(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positioned_renders_path_and_line() {
        let err = Error::positioned("app.conf", 3, Error::UnknownField("Nmae".into()));
        assert_eq!(err.to_string(), "app.conf:3: unknown key \"Nmae\"");
        assert_eq!(err.line(), Some(3));
        assert!(matches!(err.unpositioned(), Error::UnknownField(_)));
    }

    #[test]
    fn positioned_is_not_nested() {
        let inner = Error::positioned("", 2, Error::syntax("bad line"));
        let outer = Error::positioned("other", 9, inner);
        assert_eq!(outer.to_string(), ":2: bad line");
    }

    #[test]
    fn io_errors_stay_unpositioned() {
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = Error::positioned("x", 1, Error::from(io));
        assert!(err.line().is_none());
        assert!(matches!(err, Error::Io(_)));
    }
}
