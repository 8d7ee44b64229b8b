// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ordered key/value documents.
//!
//! A [`Document`] keeps keys in first-insertion order. Re-inserting an
//! existing key replaces its value in place, so the order produced by the
//! converter (metadata order) survives any later edits.

use std::slice;

use serde_json::{Map, Value as Json};

use crate::value::Value;

/// Ordered, open key/value record.
///
/// # Example
///
/// ```rust
/// use mongo_odm_core::{Document, Value, document};
///
/// let mut doc = document! { "name" => "Ann", "age" => 34 };
/// doc.insert("age", 35);
///
/// assert_eq!(doc.get("age"), Some(&Value::Int(35)));
/// assert_eq!(doc.keys().collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: Vec<(String, Value)>
}

impl Document {
    /// Create an empty document.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new()
        }
    }

    /// Create an empty document with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity)
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Mutable lookup by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace a value.
    ///
    /// Returns the previous value when the key already existed; its position
    /// is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter()
        }
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Identifier stored under `_id`, if it is one.
    pub fn object_id(&self) -> Option<crate::ObjectId> {
        self.get("_id").and_then(Value::as_object_id)
    }

    /// Check that every key of `filter` is present here with an equal value.
    ///
    /// An empty filter matches every document.
    pub fn matches(&self, filter: &Document) -> bool {
        filter
            .iter()
            .all(|(key, expected)| self.get(key).unwrap_or(&Value::Null) == expected)
    }

    /// Convert to a JSON object (relaxed extended JSON).
    pub fn to_json(&self) -> Json {
        let map: Map<String, Json> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        Json::Object(map)
    }

    /// Build from a JSON object map.
    pub fn from_json_map(map: &Map<String, Json>) -> Self {
        map.iter()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect()
    }

    /// Build from any JSON value; non-objects yield `None`.
    pub fn from_json(json: &Json) -> Option<Self> {
        json.as_object().map(Self::from_json_map)
    }
}

/// Borrowing iterator over document entries.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, Value)>
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Document {
    type IntoIter = Iter<'a>;
    type Item = (&'a str, &'a Value);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Document {
    type IntoIter = std::vec::IntoIter<(String, Value)>;
    type Item = (String, Value);

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Self::new();
        doc.extend(iter);
        doc
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Build a [`Document`] from `key => value` pairs.
///
/// Values go through `Into<Value>`.
///
/// ```rust
/// use mongo_odm_core::document;
///
/// let doc = document! { "a" => 1, "b" => "two" };
/// assert_eq!(doc.len(), 2);
/// ```
#[macro_export]
macro_rules! document {
    () => {
        $crate::Document::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut doc = $crate::Document::new();
        $(doc.insert($key, $value);)+
        doc
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut doc = document! { "a" => 1, "b" => 2, "c" => 3 };
        let old = doc.insert("b", 20);
        assert_eq!(old, Some(Value::Int(2)));
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(doc.get("b"), Some(&Value::Int(20)));
    }

    #[test]
    fn remove_drops_key() {
        let mut doc = document! { "a" => 1, "b" => 2 };
        assert_eq!(doc.remove("a"), Some(Value::Int(1)));
        assert_eq!(doc.remove("a"), None);
        assert_eq!(doc.len(), 1);
        assert!(!doc.contains_key("a"));
    }

    #[test]
    fn matches_on_equality() {
        let doc = document! { "name" => "Ann", "age" => 34 };
        assert!(doc.matches(&Document::new()));
        assert!(doc.matches(&document! { "name" => "Ann" }));
        assert!(!doc.matches(&document! { "name" => "Bo" }));
        assert!(doc.matches(&document! { "missing" => Value::Null }));
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let doc = document! { "name" => "Ann", "tags" => vec!["x", "y"] };
        let back = Document::from_json(&doc.to_json()).unwrap();
        assert_eq!(back.get("name"), doc.get("name"));
        assert_eq!(back.get("tags"), doc.get("tags"));
    }

    #[test]
    fn object_id_lookup() {
        let id = crate::ObjectId::new();
        let doc = document! { "_id" => id };
        assert_eq!(doc.object_id(), Some(id));
        assert_eq!(document! { "_id" => "x" }.object_id(), None);
    }
}
