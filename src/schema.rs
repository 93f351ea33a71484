//! Type descriptors: what a config file may contain.
//!
//! Every type that can appear in a config implements [`Schema`]. Its
//! [`Kind`] describes the shape of the type independent of any value, and
//! records describe their fields with a list of [`Field`]s. Both the writer
//! and the parser are driven entirely by these descriptors.
//!
//! Record descriptors are usually generated by the [`record!`](crate::record)
//! macro, but can be written by hand:
//!
//! ```rust
//! use sconf::{Field, FieldMap, Kind, RecordType, Result, Schema, Value};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Listener {
//!     port: u16,
//!     tls: bool,
//! }
//!
//! impl Schema for Listener {
//!     fn kind() -> Kind {
//!         Kind::Record(RecordType::new("Listener", || {
//!             vec![
//!                 Field::new("Port", u16::kind()).with_doc("TCP port."),
//!                 Field::new("TLS", bool::kind()).optional(),
//!             ]
//!         }))
//!     }
//!
//!     fn to_value(&self) -> Value {
//!         let mut fields = FieldMap::new();
//!         fields.insert("Port".to_string(), self.port.to_value());
//!         fields.insert("TLS".to_string(), self.tls.to_value());
//!         Value::Record(fields)
//!     }
//!
//!     fn from_value(value: Value) -> Result<Self> {
//!         let mut fields = value.into_record("Listener")?;
//!         Ok(Listener {
//!             port: sconf::schema::take_field(&mut fields, "Port")?,
//!             tls: sconf::schema::take_field(&mut fields, "TLS")?,
//!         })
//!     }
//! }
//!
//! let text = sconf::to_string(&Listener { port: 443, tls: false }, sconf::Mode::Compact).unwrap();
//! assert_eq!(text, "Port: 443\n");
//! ```

use crate::{Error, FieldMap, Result, Value};
use std::fmt;

/// A type that can be written to and parsed from a config file.
pub trait Schema: Sized {
    /// Describes the type. Must not depend on any value.
    fn kind() -> Kind;

    /// Converts a value of the type into its dynamic form.
    fn to_value(&self) -> Value;

    /// Builds a value of the type from its dynamic form.
    ///
    /// The parser only passes values matching [`Schema::kind`].
    fn from_value(value: Value) -> Result<Self>;
}

/// The shape of a type, as far as config files are concerned.
#[derive(Clone, Debug)]
pub enum Kind {
    Bool,
    /// Signed integer with the given bit width.
    Int(u32),
    /// Unsigned integer with the given bit width.
    Uint(u32),
    /// Floating point number with the given bit width (32 or 64).
    Float(u32),
    String,
    Duration,
    Record(RecordType),
    Sequence(Box<Kind>),
    Mapping { key: Box<Kind>, value: Box<Kind> },
    /// An optional, owned value. Absent is its zero value.
    Reference(Box<Kind>),
    /// A type that cannot be represented. Writing or parsing it fails.
    Unsupported(&'static str),
}

impl Kind {
    /// Returns `true` for kinds written on a single line.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        match self {
            Kind::Bool
            | Kind::Int(_)
            | Kind::Uint(_)
            | Kind::Float(_)
            | Kind::String
            | Kind::Duration => true,
            Kind::Reference(inner) => inner.is_scalar(),
            _ => false,
        }
    }

    /// Returns the zero value of the kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sconf::{Kind, Schema, Value};
    ///
    /// assert_eq!(u8::kind().zero_value(), Value::Uint(0));
    /// assert_eq!(Option::<String>::kind().zero_value(), Value::Reference(None));
    /// ```
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::Int(_) => Value::Int(0),
            Kind::Uint(_) => Value::Uint(0),
            Kind::Float(_) => Value::Float(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Duration => Value::Duration(std::time::Duration::ZERO),
            Kind::Record(record) => Value::Record(
                record
                    .fields()
                    .into_iter()
                    .filter(|f| !f.ignored)
                    .map(|f| (f.name.to_string(), f.kind.zero_value()))
                    .collect(),
            ),
            Kind::Sequence(_) => Value::Sequence(Vec::new()),
            Kind::Mapping { .. } => Value::Mapping(Vec::new()),
            Kind::Reference(_) | Kind::Unsupported(_) => Value::Reference(None),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::Int(bits) => write!(f, "int{}", bits),
            Kind::Uint(bits) => write!(f, "uint{}", bits),
            Kind::Float(bits) => write!(f, "float{}", bits),
            Kind::String => write!(f, "string"),
            Kind::Duration => write!(f, "duration"),
            Kind::Record(record) => write!(f, "{}", record.name()),
            Kind::Sequence(elem) => write!(f, "[]{}", elem),
            Kind::Mapping { key, value } => write!(f, "map[{}]{}", key, value),
            Kind::Reference(inner) => write!(f, "*{}", inner),
            Kind::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

/// Describes a record type: its name and, lazily, its fields.
///
/// Fields are produced on demand so that a record can refer to itself
/// through `Option<Box<Self>>`.
#[derive(Clone, Copy)]
pub struct RecordType {
    name: &'static str,
    fields: fn() -> Vec<Field>,
}

impl RecordType {
    pub const fn new(name: &'static str, fields: fn() -> Vec<Field>) -> Self {
        RecordType { name, fields }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All declared fields, including ignored ones. See [`resolve`] for the
    /// list the writer and parser work with.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        (self.fields)()
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

/// Describes one field of a record.
#[derive(Clone, Debug)]
pub struct Field {
    /// Key used in the document, verbatim.
    pub name: &'static str,
    pub kind: Kind,
    /// Invisible to both writer and parser.
    pub ignored: bool,
    /// May be absent from a document; written only when non-zero in compact output.
    pub optional: bool,
    /// Shown as a comment above the field in documented output.
    pub doc: Option<&'static str>,
}

impl Field {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Field {
            name,
            kind,
            ignored: false,
            optional: false,
            doc: None,
        }
    }

    /// A field that is neither written nor parsed. Its type is not described.
    pub fn ignored(name: &'static str) -> Self {
        Field {
            ignored: true,
            ..Field::new(name, Kind::Unsupported("ignored"))
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// Returns the fields of a record that take part in writing and parsing.
///
/// Ignored fields are left out; order is declaration order. Fails with
/// [`Error::KeyType`] if a mapping with a non-string key type is found in a
/// field's kind. Nested records are checked when they are resolved themselves.
///
/// # Examples
///
/// ```rust
/// use sconf::schema::{resolve, Field, Kind, RecordType};
/// use sconf::Schema;
///
/// let record = RecordType::new("Example", || {
///     vec![
///         Field::new("Name", String::kind()),
///         Field::ignored("cache"),
///         Field::new("Port", u16::kind()).optional(),
///     ]
/// });
/// let names: Vec<_> = resolve(&record).unwrap().iter().map(|f| f.name).collect();
/// assert_eq!(names, vec!["Name", "Port"]);
/// ```
pub fn resolve(record: &RecordType) -> Result<Vec<Field>> {
    let fields: Vec<Field> = record.fields().into_iter().filter(|f| !f.ignored).collect();
    for field in &fields {
        check_keys(&field.kind)?;
    }
    Ok(fields)
}

fn check_keys(kind: &Kind) -> Result<()> {
    match kind {
        Kind::Mapping { key, value } => {
            if !matches!(**key, Kind::String) {
                return Err(Error::KeyType(key.to_string()));
            }
            check_keys(value)
        }
        Kind::Sequence(inner) | Kind::Reference(inner) => check_keys(inner),
        _ => Ok(()),
    }
}

/// Whether a record value writes no lines in compact output: every field is
/// optional and zero. Such a value is written as `nil` inside a mapping.
pub fn is_vacuous(value: &Value, fields: &[Field]) -> bool {
    let Value::Record(values) = value else {
        return false;
    };
    fields.iter().all(|f| {
        f.optional && values.get(f.name).map_or(true, Value::is_zero)
    })
}

/// Takes a field out of a record value and converts it.
///
/// A missing field yields the zero value of its type.
pub fn take_field<T: Schema>(fields: &mut FieldMap, name: &str) -> Result<T> {
    match fields.remove(name) {
        Some(value) => T::from_value(value),
        None => T::from_value(T::kind().zero_value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn example() -> RecordType {
        RecordType::new("Example", || {
            vec![
                Field::new("Name", String::kind()).optional(),
                Field::new("Count", i32::kind()).optional().with_doc("count"),
                Field::ignored("Cache"),
            ]
        })
    }

    #[test]
    fn resolve_drops_ignored_fields() {
        let fields = resolve(&example()).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].doc, Some("count"));
        assert!(fields.iter().all(|f| !f.ignored));
    }

    #[test]
    fn resolve_rejects_integer_map_keys() {
        let record = RecordType::new("Bad", || {
            vec![Field::new("Map", HashMap::<i32, String>::kind())]
        });
        let err = resolve(&record).unwrap_err();
        assert!(matches!(err, Error::KeyType(ref k) if k == "int32"));
    }

    #[test]
    fn resolve_finds_keys_inside_sequences() {
        let record = RecordType::new("Bad", || {
            vec![Field::new("List", Vec::<HashMap<u8, bool>>::kind())]
        });
        assert!(matches!(resolve(&record), Err(Error::KeyType(_))));
    }

    #[test]
    fn zero_record_has_no_ignored_fields() {
        let zero = Kind::Record(example()).zero_value();
        let fields = zero.as_record().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["Name", "Count"]);
    }

    #[test]
    fn vacuous_needs_all_fields_optional_and_zero() {
        let fields = resolve(&example()).unwrap();
        let zero = Kind::Record(example()).zero_value();
        assert!(is_vacuous(&zero, &fields));

        let mut named = FieldMap::new();
        named.insert("Name".to_string(), Value::from("x"));
        assert!(!is_vacuous(&Value::Record(named), &fields));

        let required = vec![Field::new("Word", String::kind())];
        assert!(!is_vacuous(&Kind::Record(example()).zero_value(), &required));
    }

    #[test]
    fn kinds_display_like_type_names() {
        assert_eq!(Vec::<Option<u16>>::kind().to_string(), "[]*uint16");
        assert_eq!(
            HashMap::<String, f32>::kind().to_string(),
            "map[string]float32"
        );
    }
}
