//! Dynamic value representation for config data.
//!
//! [`Value`] is the intermediate form between a typed record and its text.
//! [`Schema::to_value`](crate::Schema::to_value) produces one for the writer,
//! and the parser builds one that
//! [`Schema::from_value`](crate::Schema::from_value) turns back into the record.
//!
//! ## Zero values
//!
//! Every kind has a zero value: `false`, `0`, `0.0`, the empty string, a zero
//! duration, a record of zero fields, an empty sequence or mapping, an absent
//! reference. [`Value::is_zero`] implements that test, and compact output
//! leaves out optional fields whose value is zero.
//!
//! ```rust
//! use sconf::{FieldMap, Value};
//!
//! assert!(Value::from("").is_zero());
//! assert!(!Value::from("gopher").is_zero());
//!
//! let mut fields = FieldMap::new();
//! fields.insert("Port".to_string(), Value::Uint(0));
//! assert!(Value::Record(fields).is_zero());
//! ```
//!
//! ## Serde
//!
//! `Value` implements `Serialize`, so a parsed config can be handed to any
//! serde format, e.g. printed as JSON.

use crate::FieldMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A dynamically-typed config value.
///
/// # Examples
///
/// ```rust
/// use sconf::Value;
///
/// let port = Value::Uint(8080);
/// let name = Value::from("gopher");
///
/// assert_eq!(port.as_u64(), Some(8080));
/// assert_eq!(name.as_str(), Some("gopher"));
/// assert_eq!(Value::Reference(None).kind_name(), "reference");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Duration(Duration),
    Record(FieldMap),
    Sequence(Vec<Value>),
    /// Entries in the order they were produced; the writer sorts them by key.
    Mapping(Vec<(Value, Value)>),
    Reference(Option<Box<Value>>),
}

impl Value {
    /// Returns `true` if this is the zero value of its kind.
    ///
    /// A record is zero when all of its fields are zero. Ignored fields are
    /// never part of a record value, so they do not count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sconf::Value;
    ///
    /// assert!(Value::Int(0).is_zero());
    /// assert!(Value::Sequence(vec![]).is_zero());
    /// assert!(!Value::Reference(Some(Box::new(Value::Int(0)))).is_zero());
    /// ```
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Duration(d) => d.is_zero(),
            Value::Record(fields) => fields.values().all(Value::is_zero),
            Value::Sequence(elems) => elems.is_empty(),
            Value::Mapping(entries) => entries.is_empty(),
            Value::Reference(target) => target.is_none(),
        }
    }

    /// Returns a short name for the kind of this value, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Duration(_) => "duration",
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Reference(_) => "reference",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a signed integer, or an unsigned one that fits, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// If the value is an unsigned integer, or a non-negative signed one, returns it.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(u) => Some(*u),
            Value::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a record, returns its fields. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&FieldMap> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// If the value is a sequence, returns its elements. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(elems) => Some(elems),
            _ => None,
        }
    }

    /// Looks up a mapping entry by its string key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sconf::Value;
    ///
    /// let map = Value::Mapping(vec![(Value::from("a"), Value::Bool(true))]);
    /// assert_eq!(map.get_entry("a"), Some(&Value::Bool(true)));
    /// assert_eq!(map.get_entry("b"), None);
    /// ```
    #[must_use]
    pub fn get_entry(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Unwraps a record value, for use in [`Schema::from_value`](crate::Schema::from_value).
    pub fn into_record(self, expected: &str) -> crate::Result<FieldMap> {
        match self {
            Value::Record(fields) => Ok(fields),
            other => Err(crate::Error::type_mismatch(expected, other.kind_name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{:.6}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Duration(d) => write!(f, "{}", crate::literal::format_duration(*d)),
            Value::Record(fields) => write!(f, "{{record of {} fields}}", fields.len()),
            Value::Sequence(elems) => write!(f, "[{} elements]", elems.len()),
            Value::Mapping(entries) => write!(f, "{{{} entries}}", entries.len()),
            Value::Reference(Some(target)) => write!(f, "{}", target),
            Value::Reference(None) => write!(f, "nil"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Duration(d) => {
                serializer.serialize_str(&crate::literal::format_duration(*d))
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Sequence(elems) => {
                let mut seq = serializer.serialize_seq(Some(elems.len()))?;
                for element in elems {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Reference(Some(target)) => serializer.serialize_some(target.as_ref()),
            Value::Reference(None) => serializer.serialize_none(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<FieldMap> for Value {
    fn from(value: FieldMap) -> Self {
        Value::Record(value)
    }
}
