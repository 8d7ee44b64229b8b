// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scalar kinds: declared type tags and inference from Rust types.
//!
//! | Rust type | Kind |
//! |-----------|------|
//! | `String` | `string` |
//! | `i8` .. `i64`, `u8` .. `u32` | `int` |
//! | `f32`, `f64` | `float` |
//! | `bool` | `bool` |
//! | `Vec<Value>` | `array` |
//! | `DateTime<_>` | `date` |
//! | `ObjectId` | `id` |
//! | `Value` | `raw` |
//!
//! `Option<T>` infers as `T`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// Kind of a non-embedded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    Int,
    Float,
    Array,
    Date,
    Identifier,
    Raw,
    /// Unrecognised tag, stored verbatim.
    Other(String)
}

impl ScalarKind {
    /// Map a `type = "..."` tag.
    ///
    /// Returns `None` for the embed tags, which need their own attributes.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "string" => Self::String,
            "bool" | "boolean" => Self::Bool,
            "int" | "integer" => Self::Int,
            "float" | "double" => Self::Float,
            "array" => Self::Array,
            "date" => Self::Date,
            "id" | "identifier" => Self::Identifier,
            "raw" => Self::Raw,
            "embedOne" | "embedMany" => return None,
            other => Self::Other(other.to_string())
        })
    }

    /// Infer the kind from a field type.
    pub fn infer(ty: &Type) -> Option<Self> {
        let segment = last_segment(unwrap_option(ty))?;
        let name = segment.ident.to_string();
        Some(match name.as_str() {
            "String" => Self::String,
            "bool" => Self::Bool,
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => Self::Int,
            "f32" | "f64" => Self::Float,
            "DateTime" => Self::Date,
            "ObjectId" => Self::Identifier,
            "Value" => Self::Raw,
            "Vec" => {
                let item = last_segment(generic_arg(segment)?)?;
                if item.ident != "Value" {
                    return None;
                }
                Self::Array
            }
            _ => return None
        })
    }

    /// `::mongo_odm::FieldKind` expression for this kind.
    pub fn tokens(&self) -> TokenStream {
        match self {
            Self::String => quote! { ::mongo_odm::FieldKind::String },
            Self::Bool => quote! { ::mongo_odm::FieldKind::Bool },
            Self::Int => quote! { ::mongo_odm::FieldKind::Int },
            Self::Float => quote! { ::mongo_odm::FieldKind::Float },
            Self::Array => quote! { ::mongo_odm::FieldKind::Array },
            Self::Date => quote! { ::mongo_odm::FieldKind::Date },
            Self::Identifier => quote! { ::mongo_odm::FieldKind::Identifier },
            Self::Raw => quote! { ::mongo_odm::FieldKind::Raw },
            Self::Other(tag) => quote! { ::mongo_odm::FieldKind::Other(#tag) }
        }
    }
}

/// Last path segment of a path type.
pub fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None
    }
}

/// First generic type argument of a segment, e.g. `T` in `Vec<T>`.
pub fn generic_arg(segment: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None
    })
}

/// `T` for `Option<T>`, the type itself otherwise.
pub fn unwrap_option(ty: &Type) -> &Type {
    option_inner(ty).unwrap_or(ty)
}

/// `Some(T)` for `Option<T>`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    last_segment(ty)
        .filter(|segment| segment.ident == "Option")
        .and_then(generic_arg)
}

/// `Some(T)` for `Vec<T>`.
pub fn vec_inner(ty: &Type) -> Option<&Type> {
    last_segment(ty)
        .filter(|segment| segment.ident == "Vec")
        .and_then(generic_arg)
}
