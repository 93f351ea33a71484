//! Ordered field map for record values.
//!
//! This module provides [`FieldMap`], a wrapper around [`IndexMap`] that keeps
//! record fields in declaration order. The writer emits fields in this order,
//! so the map must never reorder them.
//!
//! ## Examples
//!
//! ```rust
//! use sconf::{FieldMap, Value};
//!
//! let mut map = FieldMap::new();
//! map.insert("Name".to_string(), Value::from("gopher"));
//! map.insert("Port".to_string(), Value::Uint(80));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("Name").and_then(|v| v.as_str()), Some("gopher"));
//! ```

use indexmap::IndexMap;

/// An ordered map of field names to values.
///
/// # Examples
///
/// ```rust
/// use sconf::{FieldMap, Value};
///
/// let mut map = FieldMap::new();
/// map.insert("second".to_string(), Value::Int(2));
/// map.insert("first".to_string(), Value::Int(1));
///
/// // Iteration keeps insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["second", "first"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap(IndexMap<String, crate::Value>);

impl FieldMap {
    /// Creates an empty `FieldMap`.
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    /// Creates an empty `FieldMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, keeping the position of an existing field with the same name.
    ///
    /// If the map already contained this field, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sconf::{FieldMap, Value};
    ///
    /// let mut map = FieldMap::new();
    /// assert!(map.insert("key".to_string(), Value::Int(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::Int(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Removes a field and returns its value, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of fields in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the field names, in order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the field values, in order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the fields, in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}
