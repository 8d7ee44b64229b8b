// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-kind value coercion.
//!
//! [`to_field`] turns a document value into a [`FieldValue`] for a field of
//! a given kind; [`to_document`] goes the other way. Both are pure apart
//! from identifier generation and the [`Embedder`] callback used for the
//! embedded kinds.
//!
//! # Policy
//!
//! - Null (or a missing key) becomes the kind's zero value in both
//!   directions: `""`, `false`, `0`, `0.0`, `[]`, and an empty list for
//!   `embedMany`. Date, identifier, `embedOne` and raw values stay null when
//!   read, so `Option` fields of those kinds hydrate to `None`.
//! - A present value converts only through a defined rule below. Anything
//!   else is a [`CoerceError`]; nothing is silently defaulted.
//! - An identifier field is written as-is when it holds an [`ObjectId`] and
//!   as a freshly generated one otherwise.
//!
//! | Kind | Accepts |
//! |------|---------|
//! | `string` | anything; composite values render as compact JSON |
//! | `bool` | bool, numbers (non-zero is true), `true/false/1/0/yes/no/on/off`, blank |
//! | `int` | int, finite float (truncated), bool, numeric or blank string, datetime (epoch ms) |
//! | `float` | float, int, bool, numeric or blank string |
//! | `array` | array; any other value becomes a one-element array |
//! | `date` | datetime, int (epoch ms), RFC 3339 string |
//! | `id` | object id, 24-hex string |
//! | `embedOne` | document |
//! | `embedMany` | array of documents |
//! | `raw`, other | anything, unchanged |

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

use crate::{
    descriptor::{EntityRef, FieldDescriptor, FieldKind},
    document::Document,
    error::{CoerceError, ConvertError},
    model::{EntityObject, FieldRef, FieldValue},
    object_id::ObjectId,
    value::Value
};

/// Recursion hook for the embedded kinds.
///
/// Implemented by the converter; the coercer calls back into it for every
/// embedded document or entity.
pub trait Embedder {
    /// Build a `target` entity from a nested document.
    ///
    /// # Errors
    ///
    /// Any conversion failure inside the nested document.
    fn hydrate(
        &self,
        target: EntityRef,
        document: Document
    ) -> Result<Box<dyn EntityObject>, ConvertError>;

    /// Build a nested document from an embedded entity.
    ///
    /// # Errors
    ///
    /// Any conversion failure inside the embedded entity.
    fn dehydrate(&self, entity: &dyn EntityObject) -> Result<Document, ConvertError>;
}

/// Coerce a document value for a field described by `descriptor`.
///
/// # Errors
///
/// [`CoerceError`] when the value has no defined conversion to the kind, or
/// when an embedded conversion fails.
pub fn to_field<E: Embedder + ?Sized>(
    value: Value,
    descriptor: &FieldDescriptor,
    embedder: &E
) -> Result<FieldValue, CoerceError> {
    let kind = descriptor.kind;
    if value.is_null() {
        return Ok(match kind {
            FieldKind::String => FieldValue::String(String::new()),
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::Int => FieldValue::Int(0),
            FieldKind::Float => FieldValue::Float(0.0),
            FieldKind::Array => FieldValue::Array(Vec::new()),
            FieldKind::EmbedMany => FieldValue::Many(Vec::new()),
            _ => FieldValue::Null
        });
    }
    Ok(match kind {
        FieldKind::String => FieldValue::String(stringify(&value)),
        FieldKind::Bool => FieldValue::Bool(to_bool(&value)?),
        FieldKind::Int => FieldValue::Int(to_int(&value)?),
        FieldKind::Float => FieldValue::Float(to_float(&value)?),
        FieldKind::Array => FieldValue::Array(to_array(value)),
        FieldKind::Date => FieldValue::Date(to_date(&value)?.with_timezone(&Local)),
        FieldKind::Identifier => FieldValue::Id(to_object_id(&value)?),
        FieldKind::EmbedOne => {
            let target = embed_target(descriptor)?;
            FieldValue::One(hydrate(embedder, target, value)?)
        }
        FieldKind::EmbedMany => {
            let target = embed_target(descriptor)?;
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(CoerceError::invalid(
                        kind,
                        other.type_name(),
                        "expected an array of documents"
                    ));
                }
            };
            let entities = items
                .into_iter()
                .map(|item| hydrate(embedder, target, item))
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::Many(entities)
        }
        FieldKind::Raw | FieldKind::Other(_) => FieldValue::Raw(value)
    })
}

/// Coerce a field value into a document value for `descriptor`.
///
/// # Errors
///
/// [`CoerceError`] when the field value has no defined conversion to the
/// kind, or when an embedded conversion fails.
pub fn to_document<E: Embedder + ?Sized>(
    field: FieldRef<'_>,
    descriptor: &FieldDescriptor,
    embedder: &E
) -> Result<Value, CoerceError> {
    let kind = descriptor.kind;
    if let FieldRef::Null = field {
        return Ok(match kind {
            FieldKind::Identifier => Value::ObjectId(ObjectId::new()),
            FieldKind::EmbedMany => Value::Array(Vec::new()),
            _ => zero(kind).unwrap_or(Value::Null)
        });
    }

    match (kind, field) {
        (FieldKind::EmbedOne, FieldRef::One(entity)) => {
            Ok(Value::Document(embedder.dehydrate(entity).map_err(embedded)?))
        }
        (FieldKind::EmbedMany, FieldRef::Many(entities)) => entities
            .into_iter()
            .map(|entity| embedder.dehydrate(entity).map(Value::Document))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
            .map_err(embedded),
        (_, field @ (FieldRef::One(_) | FieldRef::Many(_))) => Err(CoerceError::invalid(
            kind,
            field.type_name(),
            "embedded entities need an embedOne or embedMany field"
        )),
        (_, field) => {
            let found = field.type_name();
            let value = field
                .to_value()
                .ok_or_else(|| CoerceError::invalid(kind, found, "not a plain value"))?;
            match kind {
                FieldKind::String => Ok(Value::String(stringify(&value))),
                FieldKind::Bool => to_bool(&value).map(Value::Bool),
                FieldKind::Int => to_int(&value).map(Value::Int),
                FieldKind::Float => to_float(&value).map(Value::Float),
                FieldKind::Array => Ok(Value::Array(to_array(value))),
                FieldKind::Date => to_date(&value).map(Value::DateTime),
                FieldKind::Identifier => Ok(Value::ObjectId(match value {
                    Value::ObjectId(id) => id,
                    _ => ObjectId::new()
                })),
                FieldKind::EmbedOne | FieldKind::EmbedMany => Err(CoerceError::invalid(
                    kind,
                    found,
                    "expected an embedded entity"
                )),
                FieldKind::Raw | FieldKind::Other(_) => Ok(value)
            }
        }
    }
}

/// Zero value of the scalar kinds that have one.
fn zero(kind: FieldKind) -> Option<Value> {
    match kind {
        FieldKind::String => Some(Value::String(String::new())),
        FieldKind::Bool => Some(Value::Bool(false)),
        FieldKind::Int => Some(Value::Int(0)),
        FieldKind::Float => Some(Value::Float(0.0)),
        FieldKind::Array => Some(Value::Array(Vec::new())),
        _ => None
    }
}

fn embed_target(descriptor: &FieldDescriptor) -> Result<EntityRef, CoerceError> {
    descriptor
        .embed_target
        .ok_or(CoerceError::MissingTarget(descriptor.kind))
}

fn hydrate<E: Embedder + ?Sized>(
    embedder: &E,
    target: EntityRef,
    value: Value
) -> Result<Box<dyn EntityObject>, CoerceError> {
    match value {
        Value::Document(document) => embedder.hydrate(target, document).map_err(embedded),
        other => Err(CoerceError::invalid(
            FieldKind::EmbedOne,
            other.type_name(),
            format!("expected a `{}` document", target.schema().name)
        ))
    }
}

fn embedded(err: ConvertError) -> CoerceError {
    CoerceError::Embedded(Box::new(err))
}

/// Text form of any value. Never fails.
///
/// Null is `""`, datetimes are RFC 3339 (UTC, milliseconds), identifiers are
/// hex, arrays and documents are compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        Value::ObjectId(id) => id.to_hex(),
        Value::Array(_) | Value::Document(_) | Value::Binary(_) => value.to_json().to_string()
    }
}

/// Integer form of a value, truncating toward zero.
///
/// # Errors
///
/// [`CoerceError::Invalid`] for non-numeric text, non-finite or out of range
/// floats, and composite values.
pub fn to_int(value: &Value) -> Result<i64, CoerceError> {
    let invalid = |reason: &str| CoerceError::invalid(FieldKind::Int, value.type_name(), reason);
    match value {
        Value::Null => Ok(0),
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float(f) => {
            truncate(*f).ok_or_else(|| invalid("float is not finite or out of range"))
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            if let Ok(i) = s.parse::<i64>() {
                return Ok(i);
            }
            s.parse::<f64>()
                .ok()
                .and_then(truncate)
                .ok_or_else(|| invalid("text is not a number"))
        }
        Value::DateTime(dt) => Ok(dt.timestamp_millis()),
        _ => Err(invalid("no integer form"))
    }
}

fn truncate(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f >= -LIMIT && f < LIMIT {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Float form of a value.
///
/// # Errors
///
/// [`CoerceError::Invalid`] for non-numeric text and composite values.
pub fn to_float(value: &Value) -> Result<f64, CoerceError> {
    let invalid = |reason: &str| CoerceError::invalid(FieldKind::Float, value.type_name(), reason);
    match value {
        Value::Null => Ok(0.0),
        Value::Float(f) => Ok(*f),
        Value::Int(i) => Ok(*i as f64),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0.0);
            }
            s.parse::<f64>().map_err(|_| invalid("text is not a number"))
        }
        _ => Err(invalid("no float form"))
    }
}

/// Boolean form of a value.
///
/// # Errors
///
/// [`CoerceError::Invalid`] for unrecognised words, NaN and composite
/// values.
pub fn to_bool(value: &Value) -> Result<bool, CoerceError> {
    let invalid = |reason: &str| CoerceError::invalid(FieldKind::Bool, value.type_name(), reason);
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        Value::Float(f) if f.is_nan() => Err(invalid("NaN has no truth value")),
        Value::Float(f) => Ok(*f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            _ => Err(invalid("text is not a boolean word"))
        },
        _ => Err(invalid("no boolean form"))
    }
}

/// List form of a value: arrays pass through, anything else is wrapped.
pub fn to_array(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other]
    }
}

/// Timestamp form of a value.
///
/// # Errors
///
/// [`CoerceError::Invalid`] for unparseable text, out of range epoch values
/// and other kinds.
pub fn to_date(value: &Value) -> Result<DateTime<Utc>, CoerceError> {
    let invalid = |reason: &str| CoerceError::invalid(FieldKind::Date, value.type_name(), reason);
    match value {
        Value::DateTime(dt) => Ok(*dt),
        Value::Int(ms) => Utc
            .timestamp_millis_opt(*ms)
            .single()
            .ok_or_else(|| invalid("epoch milliseconds out of range")),
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| invalid("text is not an RFC 3339 timestamp")),
        _ => Err(invalid("no timestamp form"))
    }
}

/// Identifier form of a value.
///
/// # Errors
///
/// [`CoerceError::Invalid`] for text that is not 24 hex digits and for
/// other kinds.
pub fn to_object_id(value: &Value) -> Result<ObjectId, CoerceError> {
    let invalid =
        |reason: String| CoerceError::invalid(FieldKind::Identifier, value.type_name(), reason);
    match value {
        Value::ObjectId(id) => Ok(*id),
        Value::String(s) => ObjectId::parse_str(s.trim()).map_err(|e| invalid(e.to_string())),
        _ => Err(invalid("no identifier form".to_string()))
    }
}

#[cfg(test)]
mod tests;
