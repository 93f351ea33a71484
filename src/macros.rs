/// Declares a struct and implements [`Schema`](crate::Schema) for it.
///
/// A field may carry `#[sconf(...)]` attributes with these flags:
///
/// - `optional`: the field may be left out of a document, and compact output
///   leaves it out when it is zero
/// - `ignore`: the field is neither written nor parsed; its type only needs
///   `Default`
/// - `doc = "..."`: comment written above the field in documented output
/// - `rename = "..."`: key used in the document instead of the field name
///
/// Other field attributes, doc comments included, are kept on the struct.
///
/// # Examples
///
/// ```rust
/// use sconf::{record, Mode};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Server {
///         #[sconf(rename = "Host", doc = "Name to listen on.")]
///         pub host: String,
///         /// Zero picks a free port.
///         #[sconf(rename = "Port", optional)]
///         pub port: u16,
///         #[sconf(ignore)]
///         pub connections: usize,
///     }
/// }
///
/// let server = Server { host: "localhost".into(), port: 0, connections: 3 };
/// assert_eq!(
///     sconf::to_string(&server, Mode::Documented).unwrap(),
///     "# Name to listen on.\nHost: localhost\n"
/// );
///
/// let parsed: Server = sconf::from_str("Host: example.org\nPort: 8080").unwrap();
/// assert_eq!(parsed, Server { host: "example.org".into(), port: 8080, connections: 0 });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($attr:tt)*])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::__sconf_struct! {
            { $(#[$meta])* $vis struct $name }
            {}
            $( ([] [$(#[$($attr)*])*] [$fvis $field: $ty]) )*
        }

        impl $crate::Schema for $name {
            fn kind() -> $crate::Kind {
                $crate::Kind::Record($crate::RecordType::new(stringify!($name), || {
                    ::std::vec![
                        $(
                            $crate::__sconf_if_ignored!(
                                { $(#[$($attr)*])* }
                                {
                                    $crate::Field::ignored(
                                        $crate::__sconf_name!($field; $(#[$($attr)*])*)
                                    )
                                }
                                {
                                    $crate::__sconf_field!(
                                        $crate::Field::new(
                                            $crate::__sconf_name!($field; $(#[$($attr)*])*),
                                            <$ty as $crate::Schema>::kind()
                                        );
                                        $(#[$($attr)*])*
                                    )
                                }
                            ),
                        )*
                    ]
                }))
            }

            fn to_value(&self) -> $crate::Value {
                #[allow(unused_mut)]
                let mut fields = $crate::FieldMap::new();
                $(
                    $crate::__sconf_if_ignored!(
                        { $(#[$($attr)*])* }
                        {}
                        {
                            fields.insert(
                                ::std::string::String::from(
                                    $crate::__sconf_name!($field; $(#[$($attr)*])*)
                                ),
                                $crate::Schema::to_value(&self.$field),
                            );
                        }
                    );
                )*
                $crate::Value::Record(fields)
            }

            fn from_value(value: $crate::Value) -> $crate::Result<Self> {
                #[allow(unused_mut, unused_variables)]
                let mut fields = value.into_record(stringify!($name))?;
                ::std::result::Result::Ok($name {
                    $(
                        $field: $crate::__sconf_if_ignored!(
                            { $(#[$($attr)*])* }
                            { ::std::default::Default::default() }
                            {
                                $crate::schema::take_field(
                                    &mut fields,
                                    $crate::__sconf_name!($field; $(#[$($attr)*])*),
                                )?
                            }
                        ),
                    )*
                })
            }
        }
    };
}

/// Emits the struct of a record, dropping `#[sconf]` field attributes.
///
/// Each pending field is `([kept attributes] [attributes left] [declaration])`.
#[doc(hidden)]
#[macro_export]
macro_rules! __sconf_struct {
    ({ $($head:tt)* } { $($done:tt)* }) => {
        $($head)* { $($done)* }
    };
    ({ $($head:tt)* } { $($done:tt)* }
        ([$($kept:tt)*] [] [$($decl:tt)*]) $($fields:tt)*) => {
        $crate::__sconf_struct! {
            { $($head)* } { $($done)* $($kept)* $($decl)*, } $($fields)*
        }
    };
    ({ $($head:tt)* } { $($done:tt)* }
        ([$($kept:tt)*] [#[sconf $($flags:tt)*] $($attrs:tt)*] [$($decl:tt)*]) $($fields:tt)*) => {
        $crate::__sconf_struct! {
            { $($head)* } { $($done)* } ([$($kept)*] [$($attrs)*] [$($decl)*]) $($fields)*
        }
    };
    ({ $($head:tt)* } { $($done:tt)* }
        ([$($kept:tt)*] [#[$($attr:tt)*] $($attrs:tt)*] [$($decl:tt)*]) $($fields:tt)*) => {
        $crate::__sconf_struct! {
            { $($head)* } { $($done)* } ([$($kept)* #[$($attr)*]] [$($attrs)*] [$($decl)*]) $($fields)*
        }
    };
}

/// Expands to the second group if the flags contain `ignore`, else the third.
///
/// Flags are read from `#[sconf(...)]` attributes; other attributes are skipped.
#[doc(hidden)]
#[macro_export]
macro_rules! __sconf_if_ignored {
    ({} { $($yes:tt)* } { $($no:tt)* }) => { $($no)* };
    ({ ignore $($rest:tt)* } { $($yes:tt)* } { $($no:tt)* }) => { $($yes)* };
    ({ #[sconf( $($flags:tt)* )] $($rest:tt)* } $yes:tt $no:tt) => {
        $crate::__sconf_if_ignored!({ $($flags)* $($rest)* } $yes $no)
    };
    ({ $skip:tt $($rest:tt)* } $yes:tt $no:tt) => {
        $crate::__sconf_if_ignored!({ $($rest)* } $yes $no)
    };
}

/// Document key of a field: its `rename` flag, or the field name.
#[doc(hidden)]
#[macro_export]
macro_rules! __sconf_name {
    ($field:ident;) => { stringify!($field) };
    ($field:ident; rename = $name:literal $($rest:tt)*) => { $name };
    ($field:ident; #[sconf( $($flags:tt)* )] $($rest:tt)*) => {
        $crate::__sconf_name!($field; $($flags)* $($rest)*)
    };
    ($field:ident; $skip:tt $($rest:tt)*) => { $crate::__sconf_name!($field; $($rest)*) };
}

/// Applies the `optional` and `doc` flags to a field descriptor.
#[doc(hidden)]
#[macro_export]
macro_rules! __sconf_field {
    ($field:expr;) => { $field };
    ($field:expr; optional $($rest:tt)*) => {
        $crate::__sconf_field!($field.optional(); $($rest)*)
    };
    ($field:expr; doc = $doc:literal $($rest:tt)*) => {
        $crate::__sconf_field!($field.with_doc($doc); $($rest)*)
    };
    ($field:expr; #[sconf( $($flags:tt)* )] $($rest:tt)*) => {
        $crate::__sconf_field!($field; $($flags)* $($rest)*)
    };
    ($field:expr; $skip:tt $($rest:tt)*) => { $crate::__sconf_field!($field; $($rest)*) };
}

#[cfg(test)]
mod tests {
    use crate::schema::resolve;
    use crate::{Kind, Schema, Value};

    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Flags {
            plain: bool,
            #[sconf(optional)]
            opt: i32,
            #[sconf(doc = "documented", optional)]
            both: String,
            #[sconf(rename = "Renamed")]
            renamed: u8,
            #[sconf(ignore)]
            skipped: Vec<u8>,
        }
    }

    fn record_fields() -> Vec<crate::Field> {
        match Flags::kind() {
            Kind::Record(record) => record.fields(),
            other => panic!("expected record, got {}", other),
        }
    }

    #[test]
    fn test_flags_become_descriptors() {
        let fields = record_fields();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].name, "plain");
        assert!(!fields[0].optional);
        assert!(fields[1].optional);
        assert_eq!(fields[2].doc, Some("documented"));
        assert!(fields[2].optional);
        assert_eq!(fields[3].name, "Renamed");
        assert!(fields[4].ignored);
    }

    #[test]
    fn test_ignored_fields_are_not_resolved() {
        let Kind::Record(record) = Flags::kind() else {
            panic!("expected record");
        };
        let names: Vec<_> = resolve(&record).unwrap().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["plain", "opt", "both", "Renamed"]);
    }

    #[test]
    fn test_to_value_uses_document_keys() {
        let flags = Flags {
            renamed: 7,
            skipped: vec![1],
            ..Flags::default()
        };
        let value = flags.to_value();
        let fields = value.as_record().unwrap();
        assert_eq!(fields.get("Renamed"), Some(&Value::Uint(7)));
        assert!(fields.get("skipped").is_none());
    }

    #[test]
    fn test_from_value_defaults_ignored_fields() {
        let flags = Flags {
            plain: true,
            skipped: vec![1, 2],
            ..Flags::default()
        };
        let back = Flags::from_value(flags.to_value()).unwrap();
        assert_eq!(
            back,
            Flags {
                plain: true,
                ..Flags::default()
            }
        );
    }
}
