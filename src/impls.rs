//! [`Schema`] implementations for standard library types.

use crate::{Error, Kind, Result, Schema, Value};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;
use std::time::Duration;

impl Schema for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::type_mismatch("bool", value.kind_name()))
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl Schema for $ty {
            fn kind() -> Kind {
                Kind::Int(<$ty>::BITS)
            }

            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }

            fn from_value(value: Value) -> Result<Self> {
                let n = value
                    .as_i64()
                    .ok_or_else(|| Error::type_mismatch(Self::kind(), value.kind_name()))?;
                <$ty>::try_from(n).map_err(|_| Error::overflow(&n.to_string(), Self::kind()))
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Schema for $ty {
            fn kind() -> Kind {
                Kind::Uint(<$ty>::BITS)
            }

            fn to_value(&self) -> Value {
                Value::Uint(*self as u64)
            }

            fn from_value(value: Value) -> Result<Self> {
                let n = value
                    .as_u64()
                    .ok_or_else(|| Error::type_mismatch(Self::kind(), value.kind_name()))?;
                <$ty>::try_from(n).map_err(|_| Error::overflow(&n.to_string(), Self::kind()))
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl Schema for f32 {
    fn kind() -> Kind {
        Kind::Float(32)
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| Error::type_mismatch("float32", value.kind_name()))
    }
}

impl Schema for f64 {
    fn kind() -> Kind {
        Kind::Float(64)
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::type_mismatch("float64", value.kind_name()))
    }
}

impl Schema for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.kind_name())),
        }
    }
}

impl Schema for PathBuf {
    fn kind() -> Kind {
        Kind::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string_lossy().into_owned())
    }

    fn from_value(value: Value) -> Result<Self> {
        String::from_value(value).map(PathBuf::from)
    }
}

impl Schema for Duration {
    fn kind() -> Kind {
        Kind::Duration
    }

    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(Error::type_mismatch("duration", other.kind_name())),
        }
    }
}

impl<T: Schema> Schema for Vec<T> {
    fn kind() -> Kind {
        Kind::Sequence(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Sequence(elems) => elems.into_iter().map(T::from_value).collect(),
            other => Err(Error::type_mismatch(Self::kind(), other.kind_name())),
        }
    }
}

impl<T: Schema> Schema for Option<T> {
    fn kind() -> Kind {
        Kind::Reference(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::Reference(self.as_ref().map(|v| Box::new(v.to_value())))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Reference(Some(target)) => T::from_value(*target).map(Some),
            Value::Reference(None) => Ok(None),
            other => Err(Error::type_mismatch(Self::kind(), other.kind_name())),
        }
    }
}

impl<T: Schema> Schema for Box<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        T::to_value(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

fn map_to_value<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: Schema + 'a,
    V: Schema + 'a,
{
    Value::Mapping(entries.map(|(k, v)| (k.to_value(), v.to_value())).collect())
}

fn map_from_value<K, V, M>(value: Value) -> Result<M>
where
    K: Schema,
    V: Schema,
    M: FromIterator<(K, V)>,
{
    match value {
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(k, v)| -> Result<(K, V)> { Ok((K::from_value(k)?, V::from_value(v)?)) })
            .collect(),
        other => Err(Error::type_mismatch("mapping", other.kind_name())),
    }
}

fn map_kind<K: Schema, V: Schema>() -> Kind {
    Kind::Mapping {
        key: Box::new(K::kind()),
        value: Box::new(V::kind()),
    }
}

impl<K, V, S> Schema for HashMap<K, V, S>
where
    K: Schema + Eq + Hash,
    V: Schema,
    S: BuildHasher + Default,
{
    fn kind() -> Kind {
        map_kind::<K, V>()
    }

    fn to_value(&self) -> Value {
        map_to_value(self.iter())
    }

    fn from_value(value: Value) -> Result<Self> {
        map_from_value(value)
    }
}

impl<K, V> Schema for BTreeMap<K, V>
where
    K: Schema + Ord,
    V: Schema,
{
    fn kind() -> Kind {
        map_kind::<K, V>()
    }

    fn to_value(&self) -> Value {
        map_to_value(self.iter())
    }

    fn from_value(value: Value) -> Result<Self> {
        map_from_value(value)
    }
}

impl<K, V, S> Schema for IndexMap<K, V, S>
where
    K: Schema + Eq + Hash,
    V: Schema,
    S: BuildHasher + Default,
{
    fn kind() -> Kind {
        map_kind::<K, V>()
    }

    fn to_value(&self) -> Value {
        map_to_value(self.iter())
    }

    fn from_value(value: Value) -> Result<Self> {
        map_from_value(value)
    }
}

/// A dynamic value has no fixed shape, so it cannot be part of a config.
impl Schema for Value {
    fn kind() -> Kind {
        Kind::Unsupported("dynamic value")
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl Schema for () {
    fn kind() -> Kind {
        Kind::Unsupported("unit")
    }

    fn to_value(&self) -> Value {
        Value::Reference(None)
    }

    fn from_value(_value: Value) -> Result<Self> {
        Err(Error::UnsupportedType("unit".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_kinds_carry_width() {
        assert!(matches!(i8::kind(), Kind::Int(8)));
        assert!(matches!(u64::kind(), Kind::Uint(64)));
        assert!(matches!(usize::kind(), Kind::Uint(bits) if bits == usize::BITS));
    }

    #[test]
    fn narrowing_from_value_overflows() {
        let err = i8::from_value(Value::Int(300)).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }));
        assert_eq!(u8::from_value(Value::Uint(255)).unwrap(), 255);
    }

    #[test]
    fn option_maps_to_reference() {
        assert_eq!(None::<i32>.to_value(), Value::Reference(None));
        let v = Some(3u8).to_value();
        assert_eq!(Option::<u8>::from_value(v).unwrap(), Some(3));
    }

    #[test]
    fn maps_round_trip_through_values() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1i64);
        map.insert("b".to_string(), 2i64);
        let back: BTreeMap<String, i64> = Schema::from_value(map.to_value()).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn box_is_transparent() {
        assert!(matches!(Box::<bool>::kind(), Kind::Bool));
        assert_eq!(Box::new(true).to_value(), Value::Bool(true));
    }

    #[test]
    fn unit_is_nil_and_unsupported() {
        assert_eq!(().to_value(), Value::Reference(None));
        assert_eq!(<()>::kind().zero_value(), Value::Reference(None));
        let err = <()>::from_value(Value::Reference(None)).unwrap_err();
        assert_eq!(err.to_string(), "unsupported type unit");
    }

    #[test]
    fn mismatched_values_are_rejected() {
        let err = String::from_value(Value::Int(1)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
