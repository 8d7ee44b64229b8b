// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level parsing and the [`ModelDef`] used by the generators.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `collection` | No | none | Default collection for repositories |
//! | `database` | No | none | Default database |
//! | `embedded` | No | `false` | Embed-only entity |
//! | `rename_all` | No | none | Case rule for default document keys |
//!
//! Any `#[entity]` attribute, bare or with arguments, marks the struct as
//! an entity.

use convert_case::{Case, Casing};
use darling::{FromDeriveInput, FromMeta};
use syn::{Data, DeriveInput, Fields, Ident, Meta};

use super::field::FieldDef;

/// Case rule for `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Camel,
    Snake,
    Pascal,
    Kebab,
    ScreamingSnake
}

impl RenameRule {
    /// Apply the rule to a Rust field name.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Camel => name.to_case(Case::Camel),
            Self::Snake => name.to_case(Case::Snake),
            Self::Pascal => name.to_case(Case::UpperCamel),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::ScreamingSnake => name.to_case(Case::UpperSnake)
        }
    }
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "PascalCase" => Ok(Self::Pascal),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            other => Err(darling::Error::unknown_value(other))
        }
    }
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct ModelAttrs {
    ident: Ident,

    #[darling(default)]
    collection: Option<String>,

    #[darling(default)]
    database: Option<String>,

    #[darling(default)]
    embedded: bool,

    #[darling(default)]
    rename_all: Option<RenameRule>
}

/// Complete parsed model definition.
#[derive(Debug)]
pub struct ModelDef {
    /// Struct name.
    pub ident: Ident,

    /// Entity marker: the struct carries `#[entity]`.
    pub entity: bool,

    /// Default collection.
    pub collection: Option<String>,

    /// Default database.
    pub database: Option<String>,

    /// Case rule for default document keys.
    pub rename_all: Option<RenameRule>,

    /// All named fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl ModelDef {
    /// Parse a model definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple or unit struct
    /// - Generic struct
    /// - Invalid `#[entity(...)]` values
    /// - `embedded` together with `collection`
    /// - Field attribute errors, or more than one `#[id]`
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(
                darling::Error::custom("Model cannot be derived for generic structs")
                    .with_span(&input.generics)
            );
        }

        let fields: Vec<FieldDef> = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Model requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Model can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let entity = input.attrs.iter().any(|attr| attr.path().is_ident("entity"));

        // darling expects an argument list; a bare #[entity] only marks.
        let mut stripped = input.clone();
        stripped
            .attrs
            .retain(|attr| !(attr.path().is_ident("entity") && matches!(attr.meta, Meta::Path(_))));
        let attrs = ModelAttrs::from_derive_input(&stripped)?;

        if let Some(second) = fields.iter().filter(|f| f.is_id()).nth(1) {
            return Err(
                darling::Error::custom("Model can have at most one #[id] field")
                    .with_span(&second.ident)
            );
        }

        if attrs.embedded && attrs.collection.is_some() {
            return Err(darling::Error::custom(
                "embedded models are stored inside their parent and cannot declare a collection"
            )
            .with_span(&input.ident));
        }

        Ok(Self {
            ident: attrs.ident,
            entity,
            collection: attrs.collection,
            database: attrs.database,
            rename_all: attrs.rename_all,
            fields
        })
    }

    /// Type name as written.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    /// The identifier field, if any.
    #[must_use]
    pub fn id_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.is_id())
    }

    /// Document key override for `field`.
    ///
    /// `None` when the key equals the Rust field name. Identifiers always
    /// map to `_id` and never carry an override.
    #[must_use]
    pub fn document_name(&self, field: &FieldDef) -> Option<String> {
        if field.is_id() {
            return None;
        }
        let rust = field.name();
        let key = match (&field.rename, self.rename_all) {
            (Some(name), _) => name.clone(),
            (None, Some(rule)) => rule.apply(&rust),
            (None, None) => return None
        };
        (key != rust).then_some(key)
    }
}
