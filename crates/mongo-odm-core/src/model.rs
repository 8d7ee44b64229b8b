// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model traits and typed field access.
//!
//! The converter never touches struct fields directly. Each model type
//! implements [`EntityObject`], a small name-keyed accessor surface, and
//! [`Model`], which adds the static schema and a zero-valued constructor.
//! `#[derive(Model)]` writes both.
//!
//! Values cross the accessor boundary as:
//!
//! - [`FieldRef`] when reading (borrowed, used to build documents)
//! - [`FieldValue`] when writing (owned, produced by the coercer)
//!
//! [`FieldType`] connects those to concrete Rust field types.

mod field_type;

use std::{any::Any, fmt};

use chrono::{DateTime, Local, Utc};

pub use self::field_type::FieldType;
use crate::{
    descriptor::{EntitySchema, ID_FIELD},
    document::Document,
    error::FieldError,
    object_id::ObjectId,
    value::Value
};

/// Object-safe accessor surface of a model type.
pub trait EntityObject: Any + Send + Sync {
    /// Static schema of the concrete type.
    fn model_schema(&self) -> &'static EntitySchema;

    /// Read a declared field by Rust name.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Write a declared field by Rust name.
    ///
    /// # Errors
    ///
    /// [`FieldError`] when the name is unknown or the value does not fit the
    /// field's Rust type.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError>;

    /// Identifier found under the conventional `_id` name, for types without
    /// an identifier descriptor.
    fn conventional_id(&self) -> Option<ObjectId> {
        None
    }

    /// Borrow `self` as a document, for types that are one.
    fn as_document(&self) -> Option<&Document> {
        None
    }
}

impl fmt::Debug for dyn EntityObject + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ .. }}", self.model_schema().name)
    }
}

/// A concrete model type.
///
/// `Default` supplies the zero value every field falls back to when its
/// document key is missing.
pub trait Model: EntityObject + Default {
    /// Static schema of this type.
    fn schema() -> &'static EntitySchema;
}

/// Borrowed view of a field value.
#[derive(Debug, Clone)]
pub enum FieldRef<'a> {
    /// Missing optional value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// Text.
    String(&'a str),
    /// List of raw values.
    Array(&'a [Value]),
    /// Local date/time.
    Date(DateTime<Local>),
    /// Identifier.
    Id(ObjectId),
    /// Raw value.
    Raw(&'a Value),
    /// Embedded entity.
    One(&'a dyn EntityObject),
    /// Embedded entities, in order.
    Many(Vec<&'a dyn EntityObject>)
}

impl FieldRef<'_> {
    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Date(_) => "date",
            Self::Id(_) => "objectId",
            Self::Raw(value) => value.type_name(),
            Self::One(_) => "entity",
            Self::Many(_) => "entity list"
        }
    }

    /// Plain document value for non-embedded variants.
    pub fn to_value(&self) -> Option<Value> {
        Some(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Int(*i),
            Self::Float(f) => Value::Float(*f),
            Self::String(s) => Value::String((*s).to_string()),
            Self::Array(items) => Value::Array(items.to_vec()),
            Self::Date(dt) => Value::DateTime(dt.with_timezone(&Utc)),
            Self::Id(id) => Value::ObjectId(*id),
            Self::Raw(value) => (*value).clone(),
            Self::One(_) | Self::Many(_) => return None
        })
    }
}

/// Owned field value produced by the coercer.
#[derive(Debug)]
pub enum FieldValue {
    /// Absent value; fields fall back to their zero value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// Text.
    String(String),
    /// List of raw values.
    Array(Vec<Value>),
    /// Local date/time.
    Date(DateTime<Local>),
    /// Identifier.
    Id(ObjectId),
    /// Raw value.
    Raw(Value),
    /// Embedded entity.
    One(Box<dyn EntityObject>),
    /// Embedded entities, in order.
    Many(Vec<Box<dyn EntityObject>>)
}

impl FieldValue {
    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Date(_) => "date",
            Self::Id(_) => "objectId",
            Self::Raw(value) => value.type_name(),
            Self::One(_) => "entity",
            Self::Many(_) => "entity list"
        }
    }

    /// Turn a raw value into the matching typed variant.
    ///
    /// Lets a field declared `raw` still land in a `String` or `i64`.
    /// Documents and binary data stay raw.
    #[must_use]
    pub fn lift(self) -> Self {
        match self {
            Self::Raw(value) => match value {
                Value::Null => Self::Null,
                Value::Bool(b) => Self::Bool(b),
                Value::Int(i) => Self::Int(i),
                Value::Float(f) => Self::Float(f),
                Value::String(s) => Self::String(s),
                Value::Array(items) => Self::Array(items),
                Value::DateTime(dt) => Self::Date(dt.with_timezone(&Local)),
                Value::ObjectId(id) => Self::Id(id),
                other @ (Value::Document(_) | Value::Binary(_)) => Self::Raw(other)
            },
            other => other
        }
    }

    /// Convert a non-embedded value into a plain document value.
    ///
    /// # Errors
    ///
    /// [`FieldError::TypeMismatch`] for embedded entities.
    pub fn into_value(self) -> Result<Value, FieldError> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::Int(i),
            Self::Float(f) => Value::Float(f),
            Self::String(s) => Value::String(s),
            Self::Array(items) => Value::Array(items),
            Self::Date(dt) => Value::DateTime(dt.with_timezone(&Utc)),
            Self::Id(id) => Value::ObjectId(id),
            Self::Raw(value) => value,
            other @ (Self::One(_) | Self::Many(_)) => {
                return Err(FieldError::mismatch("value", other.type_name()));
            }
        })
    }

    /// Take a single embedded entity of type `T`.
    ///
    /// `Null` yields `None`.
    ///
    /// # Errors
    ///
    /// [`FieldError::TypeMismatch`] when the value is not an entity of `T`.
    pub fn into_one<T: Model>(self) -> Result<Option<T>, FieldError> {
        match self {
            Self::Null => Ok(None),
            Self::One(boxed) => downcast(boxed).map(Some),
            other => Err(FieldError::mismatch(T::schema().name, other.type_name()))
        }
    }

    /// Take a list of embedded entities of type `T`, order preserved.
    ///
    /// `Null` yields an empty list.
    ///
    /// # Errors
    ///
    /// [`FieldError::TypeMismatch`] when any element is not a `T`.
    pub fn into_many<T: Model>(self) -> Result<Vec<T>, FieldError> {
        match self {
            Self::Null => Ok(Vec::new()),
            Self::Many(items) => items.into_iter().map(downcast).collect(),
            other => Err(FieldError::mismatch(T::schema().name, other.type_name()))
        }
    }
}

fn downcast<T: Model>(boxed: Box<dyn EntityObject>) -> Result<T, FieldError> {
    let found = boxed.model_schema().name;
    let any: Box<dyn Any> = boxed;
    any.downcast::<T>()
        .map(|b| *b)
        .map_err(|_| FieldError::mismatch(T::schema().name, found))
}

/// Documents are models without the entity marker: the converter passes
/// them through untouched.
static DOCUMENT_SCHEMA: EntitySchema = EntitySchema::unmapped("Document", &[]);

impl EntityObject for Document {
    fn model_schema(&self) -> &'static EntitySchema {
        &DOCUMENT_SCHEMA
    }

    fn field(&self, _name: &str) -> Option<FieldRef<'_>> {
        None
    }

    fn set_field(&mut self, name: &str, _value: FieldValue) -> Result<(), FieldError> {
        Err(FieldError::UnknownField(name.to_string()))
    }

    fn conventional_id(&self) -> Option<ObjectId> {
        self.get(ID_FIELD).and_then(Value::as_object_id)
    }

    fn as_document(&self) -> Option<&Document> {
        Some(self)
    }
}

impl Model for Document {
    fn schema() -> &'static EntitySchema {
        &DOCUMENT_SCHEMA
    }
}
