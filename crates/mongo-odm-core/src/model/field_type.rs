// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! [`FieldType`] implementations for the supported Rust field types.
//!
//! | Rust type | Read as | Written from | `Null` becomes |
//! |-----------|---------|--------------|----------------|
//! | `String` | `String` | `String` | `""` |
//! | `bool` | `Bool` | `Bool` | `false` |
//! | `i8`..`i64`, `u8`..`u32` | `Int` | `Int` (range checked) | `0` |
//! | `f32`, `f64` | `Float` | `Float`, `Int` | `0.0` |
//! | `Vec<Value>` | `Array` | `Array` | `[]` |
//! | `DateTime<Local>`, `DateTime<Utc>` | `Date` | `Date` | error |
//! | `ObjectId` | `Id` | `Id` | error |
//! | `Value` | `Raw` | anything scalar | `Value::Null` |
//! | `Option<T>` | `T` or `Null` | `T` | `None` |

use chrono::{DateTime, Local, Utc};

use super::{FieldRef, FieldValue};
use crate::{error::FieldError, object_id::ObjectId, value::Value};

/// Conversion between a Rust field type and the accessor value types.
pub trait FieldType: Sized {
    /// Borrow the field as a [`FieldRef`].
    fn to_field_ref(&self) -> FieldRef<'_>;

    /// Build the field from a coerced [`FieldValue`].
    ///
    /// # Errors
    ///
    /// [`FieldError`] when the value has the wrong shape or range.
    fn from_field_value(value: FieldValue) -> Result<Self, FieldError>;
}

impl FieldType for String {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::String(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value.lift() {
            FieldValue::String(s) => Ok(s),
            FieldValue::Null => Ok(String::new()),
            other => Err(FieldError::mismatch("string", other.type_name()))
        }
    }
}

impl FieldType for bool {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Bool(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value.lift() {
            FieldValue::Bool(b) => Ok(b),
            FieldValue::Null => Ok(false),
            other => Err(FieldError::mismatch("bool", other.type_name()))
        }
    }
}

macro_rules! integer_field {
    ($($ty:ty),+) => {$(
        impl FieldType for $ty {
            fn to_field_ref(&self) -> FieldRef<'_> {
                FieldRef::Int(i64::from(*self))
            }

            fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
                match value.lift() {
                    FieldValue::Int(i) => <$ty>::try_from(i).map_err(|_| FieldError::OutOfRange {
                        target: stringify!($ty),
                        value:  i.to_string()
                    }),
                    FieldValue::Null => Ok(0),
                    other => Err(FieldError::mismatch("int", other.type_name()))
                }
            }
        }
    )+};
}

integer_field!(i8, i16, i32, i64, u8, u16, u32);

impl FieldType for f64 {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Float(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value.lift() {
            FieldValue::Float(f) => Ok(f),
            FieldValue::Int(i) => Ok(i as f64),
            FieldValue::Null => Ok(0.0),
            other => Err(FieldError::mismatch("float", other.type_name()))
        }
    }
}

impl FieldType for f32 {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Float(f64::from(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        f64::from_field_value(value).map(|f| f as f32)
    }
}

impl FieldType for Vec<Value> {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Array(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value.lift() {
            FieldValue::Array(items) => Ok(items),
            FieldValue::Null => Ok(Vec::new()),
            other => Err(FieldError::mismatch("array", other.type_name()))
        }
    }
}

impl FieldType for DateTime<Local> {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Date(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value.lift() {
            FieldValue::Date(dt) => Ok(dt),
            other => Err(FieldError::mismatch("date", other.type_name()))
        }
    }
}

impl FieldType for DateTime<Utc> {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Date(self.with_timezone(&Local))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        DateTime::<Local>::from_field_value(value).map(|dt| dt.with_timezone(&Utc))
    }
}

impl FieldType for ObjectId {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Id(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value.lift() {
            FieldValue::Id(id) => Ok(id),
            other => Err(FieldError::mismatch("objectId", other.type_name()))
        }
    }
}

impl FieldType for Value {
    fn to_field_ref(&self) -> FieldRef<'_> {
        FieldRef::Raw(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        value.into_value()
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn to_field_ref(&self) -> FieldRef<'_> {
        match self {
            Some(inner) => inner.to_field_ref(),
            None => FieldRef::Null
        }
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldError> {
        match value {
            FieldValue::Null | FieldValue::Raw(Value::Null) => Ok(None),
            other => T::from_field_value(other).map(Some)
        }
    }
}
