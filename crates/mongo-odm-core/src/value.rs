// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamically typed document values.
//!
//! [`Value`] is the tagged union stored under every key of a
//! [`Document`](crate::Document). It mirrors the value kinds a document store
//! persists:
//!
//! | Variant | Stored as |
//! |---------|-----------|
//! | `Null` | null |
//! | `Bool` | boolean |
//! | `Int` | 64-bit integer |
//! | `Float` | 64-bit float |
//! | `String` | UTF-8 string |
//! | `Array` | ordered list |
//! | `Document` | nested document |
//! | `DateTime` | UTC timestamp (millisecond precision in most stores) |
//! | `ObjectId` | 12-byte identifier |
//! | `Binary` | raw bytes |
//!
//! # JSON interop
//!
//! Values convert to and from [`serde_json::Value`] using relaxed extended
//! JSON for the kinds JSON has no native form for:
//!
//! ```text
//! ObjectId  ->  {"$oid": "65a1..."}
//! DateTime  ->  {"$date": "2024-01-02T03:04:05.000Z"}
//! Binary    ->  {"$binary": "deadbeef"}
//! ```

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value as Json};

use crate::{document::Document, object_id::ObjectId};

/// A single document value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or explicit null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Nested document.
    Document(Document),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// Document identifier.
    ObjectId(ObjectId),
    /// Raw bytes.
    Binary(Vec<u8>)
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Document(_) => "document",
            Self::DateTime(_) => "datetime",
            Self::ObjectId(_) => "objectId",
            Self::Binary(_) => "binary"
        }
    }

    /// Check for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None
        }
    }

    /// Integer payload.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None
        }
    }

    /// Float payload.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None
        }
    }

    /// Boolean payload.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None
        }
    }

    /// Borrow the list payload.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None
        }
    }

    /// Borrow the nested document.
    pub const fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None
        }
    }

    /// Identifier payload.
    pub const fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectId(id) => Some(*id),
            _ => None
        }
    }

    /// Timestamp payload.
    pub const fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None
        }
    }

    /// Convert to relaxed extended JSON.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::Number((*i).into()),
            Self::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Self::String(s) => Json::String(s.clone()),
            Self::Array(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Self::Document(doc) => doc.to_json(),
            Self::DateTime(dt) => tagged("$date", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::ObjectId(id) => tagged("$oid", id.to_hex()),
            Self::Binary(bytes) => tagged("$binary", hex::encode(bytes))
        }
    }

    /// Build from relaxed extended JSON.
    ///
    /// Single-key objects `$oid`, `$date` and `$binary` whose payload parses
    /// become the matching variant; every other object becomes a document.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float)
            },
            Json::String(s) => Self::String(s.clone()),
            Json::Array(items) => Self::Array(items.iter().map(Self::from_json).collect()),
            Json::Object(map) => untag(map).unwrap_or_else(|| Self::Document(Document::from_json_map(map)))
        }
    }
}

fn tagged(tag: &str, payload: String) -> Json {
    let mut map = Map::new();
    map.insert(tag.to_string(), Json::String(payload));
    Json::Object(map)
}

fn untag(map: &Map<String, Json>) -> Option<Value> {
    if map.len() != 1 {
        return None;
    }
    let (tag, payload) = map.iter().next()?;
    let payload = payload.as_str()?;
    match tag.as_str() {
        "$oid" => ObjectId::parse_str(payload).ok().map(Value::ObjectId),
        "$date" => DateTime::parse_from_rfc3339(payload)
            .ok()
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc))),
        "$binary" => hex::decode(payload).ok().map(Value::Binary),
        _ => None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Self::Document(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Self::ObjectId(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
