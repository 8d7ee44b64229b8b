// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! A field takes at most one mapping attribute:
//!
//! | Attribute | Mapping |
//! |-----------|---------|
//! | `#[id]` | [`Mapping::Id`] |
//! | `#[field]`, `#[field(type = "...", name = "...", options(...))]` | [`Mapping::Scalar`] |
//! | `#[embed_one]`, `#[embed_one(target = Type, name = "...")]` | [`Mapping::EmbedOne`] |
//! | `#[embed_many]`, `#[embed_many(target = Type, name = "...")]` | [`Mapping::EmbedMany`] |
//!
//! Fields without one are declared but not persisted.

use syn::{Attribute, Field, Ident, LitStr, Meta, Type, ext::IdentExt, meta::ParseNestedMeta};

use super::kind::{ScalarKind, option_inner, unwrap_option, vec_inner};

const MAPPING_ATTRS: [&str; 4] = ["id", "field", "embed_one", "embed_many"];

/// How a field is persisted.
#[derive(Debug, Clone)]
pub enum Mapping {
    /// Identifier, stored under `_id`.
    Id,
    /// Plain value of the given kind.
    Scalar(ScalarKind),
    /// Single embedded model. `optional` for `Option<T>` fields.
    EmbedOne { target: Type, optional: bool },
    /// Ordered list of embedded models in a `Vec<T>` field.
    EmbedMany { target: Type }
}

/// Field definition with its parsed mapping.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Persistence mapping; `None` when the field is not persisted.
    pub mapping: Option<Mapping>,

    /// Explicit document key from `name = "..."`.
    pub rename: Option<String>,

    /// Raw options from `options(...)`, in declaration order.
    pub options: Vec<(String, String)>
}

impl FieldDef {
    /// Parse a field and its mapping attribute.
    ///
    /// # Errors
    ///
    /// - Unnamed field
    /// - More than one mapping attribute
    /// - Arguments on `#[id]`
    /// - Unknown attribute options
    /// - A scalar type that cannot be inferred
    /// - An embed target that cannot be inferred, or `embed_many` on a
    ///   non-`Vec` field
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Model fields must be named").with_span(field)
        })?;
        let mut def = Self {
            ident,
            ty: field.ty.clone(),
            mapping: None,
            rename: None,
            options: Vec::new()
        };

        let mut mapping_attrs = field
            .attrs
            .iter()
            .filter(|attr| MAPPING_ATTRS.iter().any(|name| attr.path().is_ident(name)));
        let Some(attr) = mapping_attrs.next() else {
            return Ok(def);
        };
        if let Some(extra) = mapping_attrs.next() {
            return Err(darling::Error::custom(
                "a field takes only one of #[id], #[field], #[embed_one], #[embed_many]"
            )
            .with_span(extra));
        }

        let mapping = if attr.path().is_ident("id") {
            if !matches!(attr.meta, Meta::Path(_)) {
                return Err(darling::Error::custom("#[id] takes no arguments").with_span(attr));
            }
            Mapping::Id
        } else if attr.path().is_ident("field") {
            def.parse_scalar(attr)?
        } else {
            def.parse_embed(attr)?
        };
        def.mapping = Some(mapping);
        Ok(def)
    }

    fn parse_scalar(&mut self, attr: &Attribute) -> darling::Result<Mapping> {
        let mut tag: Option<LitStr> = None;
        if matches!(attr.meta, Meta::List(_)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type") {
                    tag = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("name") {
                    self.rename = Some(parse_name(&meta)?);
                } else if meta.path.is_ident("options") {
                    meta.parse_nested_meta(|option| {
                        let key = option.path.require_ident()?.unraw().to_string();
                        let value = if option.input.peek(syn::Token![=]) {
                            option.value()?.parse::<LitStr>()?.value()
                        } else {
                            "true".to_string()
                        };
                        self.options.push((key, value));
                        Ok(())
                    })?;
                } else {
                    return Err(meta.error("expected `type`, `name` or `options`"));
                }
                Ok(())
            })?;
        }

        let kind = match tag {
            Some(tag) => ScalarKind::from_tag(&tag.value()).ok_or_else(|| {
                darling::Error::custom("embedded fields use #[embed_one] or #[embed_many]")
                    .with_span(&tag)
            })?,
            None => ScalarKind::infer(&self.ty).ok_or_else(|| {
                darling::Error::custom(
                    "cannot infer the field kind; add #[field(type = \"...\")]"
                )
                .with_span(&self.ty)
            })?
        };
        Ok(Mapping::Scalar(kind))
    }

    fn parse_embed(&mut self, attr: &Attribute) -> darling::Result<Mapping> {
        let many = attr.path().is_ident("embed_many");
        let mut target: Option<Type> = None;
        if matches!(attr.meta, Meta::List(_)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("target") {
                    target = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("name") {
                    self.rename = Some(parse_name(&meta)?);
                } else {
                    return Err(meta.error("expected `target` or `name`"));
                }
                Ok(())
            })?;
        }

        if many {
            let item = vec_inner(&self.ty).ok_or_else(|| {
                darling::Error::custom("#[embed_many] requires a Vec<T> field").with_span(&self.ty)
            })?;
            let target = target.unwrap_or_else(|| item.clone());
            return Ok(Mapping::EmbedMany { target });
        }

        let optional = option_inner(&self.ty).is_some();
        let inferred = unwrap_option(&self.ty);
        if target.is_none() && !matches!(inferred, Type::Path(_)) {
            return Err(darling::Error::custom(
                "cannot infer the embed target; add #[embed_one(target = Type)]"
            )
            .with_span(&self.ty));
        }
        let target = target.unwrap_or_else(|| inferred.clone());
        Ok(Mapping::EmbedOne { target, optional })
    }

    /// Rust field name without the raw prefix.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Check if this is the identifier field.
    #[must_use]
    pub fn is_id(&self) -> bool {
        matches!(self.mapping, Some(Mapping::Id))
    }

    /// Check if the field is persisted.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.mapping.is_some()
    }
}

fn parse_name(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let name: LitStr = meta.value()?.parse()?;
    if name.value().is_empty() {
        return Err(syn::Error::new(name.span(), "document name cannot be empty"));
    }
    Ok(name.value())
}
